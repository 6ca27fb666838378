//! The single logical operation the engine exposes to its caller:
//! `evaluate(profile, catalog, model)`.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::catalog::LenderCatalog;
use crate::explain::explain_profile;
use crate::offers::{build_offers, Offer, RATE_FLOOR_PCT};
use crate::predictor::{EligibilityModel, Features};
use crate::profile::{ApplicantProfile, BASELINE_RATE_PCT};
use crate::risk::{profile_risk, RiskBand};
use crate::types::{with_metadata, ComputationOutput};
use crate::LoanMatchResult;

/// Overall decision status derived from prediction and offer availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Approved,
    Conditional,
    Rejected,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Approved => "APPROVED",
            Self::Conditional => "CONDITIONAL",
            Self::Rejected => "REJECTED",
        };
        write!(f, "{}", s)
    }
}

/// Complete evaluation outcome for one applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    pub status: ApprovalStatus,
    /// Approval confidence, 0-100.
    pub confidence: u8,
    pub risk_band: RiskBand,
    pub risk_score: i32,
    /// Ranked offers; empty unless the prediction approved.
    pub offers: Vec<Offer>,
    /// Convenience copy of the top-ranked offer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_offer: Option<Offer>,
    pub reasons: Vec<String>,
    pub cautions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct EvaluationAssumptions {
    reference_rate_pct: Decimal,
    rate_floor_pct: Decimal,
    model_features: &'static [&'static str],
}

/// Evaluate one applicant against a lender catalog using the installed
/// eligibility model.
///
/// Stateless and free of I/O: catalog and model are injected, read-only
/// collaborators, so concurrent evaluations need no synchronization.
pub fn evaluate(
    profile: &ApplicantProfile,
    catalog: &LenderCatalog,
    model: &dyn EligibilityModel,
) -> LoanMatchResult<ComputationOutput<DecisionResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // Resolve the bucket up front: an unsupported loan type is an error,
    // never an ambiguous empty result.
    catalog.products_for(profile.loan_type)?;

    if profile.baseline_foir > Decimal::ONE {
        warnings.push(
            "Obligations exceed income at the reference rate; no lender will clear affordability."
                .into(),
        );
    }

    let features = Features::from_profile(profile);
    let decision = model.predict(&features);
    let probability = model
        .predict_probability(&features)
        .clamp(Decimal::ZERO, Decimal::ONE);
    let confidence = (probability * dec!(100)).round().to_u8().unwrap_or(0);

    let (risk_band, risk_score) = profile_risk(profile.credit_score, profile.baseline_foir, profile.stability);

    let offers = build_offers(profile, catalog, decision, confidence)?;

    let status = if decision.is_approve() && !offers.is_empty() {
        ApprovalStatus::Approved
    } else if decision.is_approve() {
        warnings.push(
            "Prediction approved but no lender cleared the affordability filters.".into(),
        );
        ApprovalStatus::Conditional
    } else {
        ApprovalStatus::Rejected
    };

    let explanation = explain_profile(profile, confidence, risk_band);
    let best_offer = offers.first().cloned();

    let result = DecisionResult {
        status,
        confidence,
        risk_band,
        risk_score,
        offers,
        best_offer,
        reasons: explanation.reasons,
        cautions: explanation.cautions,
        generated_at: Utc::now(),
    };

    let assumptions = EvaluationAssumptions {
        reference_rate_pct: BASELINE_RATE_PCT,
        rate_floor_pct: RATE_FLOOR_PCT,
        model_features: &["monthly_income", "loan_amount", "credit_score"],
    };

    Ok(with_metadata(
        "Eligibility gate (learned or rules model) + banded risk score + per-lender rate adjustment with three-key ranking",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}
