use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Ratio;

/// Qualitative risk classification derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Banded additive risk score.
///
/// Starts at 100 and applies one adjustment per factor; the bands within a
/// factor are mutually exclusive and evaluated top-down. Thresholds and
/// deltas are load-bearing for the explanation text and the offer
/// approval-fit score, so they must not drift.
pub fn profile_risk(credit_score: u16, foir: Ratio, stability: Ratio) -> (RiskBand, i32) {
    let mut risk_score: i32 = 100;

    if credit_score >= 760 {
        risk_score -= 35;
    } else if credit_score >= 700 {
        risk_score -= 22;
    } else if credit_score >= 650 {
        risk_score -= 10;
    }

    if foir <= dec!(0.35) {
        risk_score -= 25;
    } else if foir <= dec!(0.45) {
        risk_score -= 15;
    } else if foir <= dec!(0.55) {
        risk_score -= 5;
    } else {
        risk_score += 20;
    }

    if stability >= dec!(0.95) {
        risk_score -= 12;
    } else if stability < dec!(0.8) {
        risk_score += 10;
    }

    risk_score = risk_score.clamp(5, 95);

    let band = if risk_score <= 35 {
        RiskBand::Low
    } else if risk_score <= 60 {
        RiskBand::Medium
    } else {
        RiskBand::High
    };

    (band, risk_score)
}
