use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::profile::ApplicantProfile;
use crate::risk::RiskBand;

/// Human-readable narrative derived from the same signals the scoring uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Explanation {
    pub reasons: Vec<String>,
    pub cautions: Vec<String>,
}

/// Accumulate reason/caution statements in display order.
///
/// Reasons and cautions accrue independently: a profile can earn both. The
/// check order below is the order the statements are shown, so it is part
/// of the contract.
pub fn explain_profile(
    profile: &ApplicantProfile,
    confidence_pct: u8,
    risk_band: RiskBand,
) -> Explanation {
    let mut reasons = Vec::new();
    let mut cautions = Vec::new();

    if profile.credit_score >= 740 {
        reasons.push("Strong credit profile increases lender trust.".to_string());
    } else if profile.credit_score < 670 {
        cautions.push("Credit score is below preferred range for premium offers.".to_string());
    }

    if profile.baseline_foir <= dec!(0.4) {
        reasons.push("Healthy FOIR indicates manageable repayment capacity.".to_string());
    } else if profile.baseline_foir > dec!(0.55) {
        cautions.push("FOIR is high; lenders may reduce sanction amount.".to_string());
    }

    if profile.disposable_income >= dec!(0.35) * profile.monthly_income {
        reasons.push("Disposable income supports stable EMI servicing.".to_string());
    }

    if confidence_pct < 55 {
        cautions.push("Eligibility confidence is moderate; terms may vary by lender.".to_string());
    }

    // High-risk profiles are never presented caution-free.
    if risk_band == RiskBand::High && cautions.is_empty() {
        cautions.push("Overall profile is sensitive to higher loan burden.".to_string());
    }

    Explanation { reasons, cautions }
}
