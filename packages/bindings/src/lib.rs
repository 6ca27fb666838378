use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use loanmatch_core::catalog::LenderCatalog;
use loanmatch_core::predictor::{LearnedModel, ModelSelection};
use loanmatch_core::profile::{ApplicantInput, ApplicantProfile};
use loanmatch_core::types::Ratio;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EvaluateRequest {
    profile: ApplicantInput,
    /// Lender table; the builtin catalog when omitted.
    catalog: Option<LenderCatalog>,
    /// Learned eligibility artifact; the rules fallback when omitted.
    model: Option<LearnedModel>,
}

#[napi]
pub fn evaluate_application(input_json: String) -> NapiResult<String> {
    let request: EvaluateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;

    let profile = ApplicantProfile::from_input(request.profile).map_err(to_napi_error)?;
    let catalog = request.catalog.unwrap_or_else(LenderCatalog::builtin);
    let selection = ModelSelection::prefer_learned(request.model);

    let output = loanmatch_core::engine::evaluate(&profile, &catalog, selection.model())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Standalone calculations
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EmiRequest {
    principal: rust_decimal::Decimal,
    annual_rate_pct: rust_decimal::Decimal,
    months: u32,
}

#[napi]
pub fn monthly_installment(input_json: String) -> NapiResult<String> {
    let request: EmiRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = loanmatch_core::amortization::emi(
        request.principal,
        request.annual_rate_pct,
        request.months,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct RiskRequest {
    credit_score: u16,
    foir: Ratio,
    stability: Ratio,
}

#[napi]
pub fn applicant_risk(input_json: String) -> NapiResult<String> {
    let request: RiskRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let (band, score) =
        loanmatch_core::risk::profile_risk(request.credit_score, request.foir, request.stability);
    serde_json::to_string(&serde_json::json!({
        "band": band.to_string(),
        "score": score,
    }))
    .map_err(to_napi_error)
}
