use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use loanmatch_core::risk::profile_risk;
use loanmatch_core::types::EmploymentCategory;

/// Arguments for standalone risk scoring
#[derive(Args)]
pub struct RiskArgs {
    /// Credit score (300-900)
    #[arg(long)]
    pub credit_score: u16,

    /// Fixed-obligation-to-income ratio as a fraction (e.g. 0.42)
    #[arg(long)]
    pub foir: Decimal,

    /// Employment category: salaried, self_employed, freelancer
    #[arg(long, default_value = "salaried")]
    pub employment: String,

    /// Override the employment stability coefficient directly
    #[arg(long)]
    pub stability: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RiskOutput {
    band: String,
    score: i32,
    credit_score: u16,
    foir: Decimal,
    stability: Decimal,
}

pub fn run_risk(args: RiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let stability = match args.stability {
        Some(s) => s,
        None => args.employment.parse::<EmploymentCategory>()?.stability(),
    };

    let (band, score) = profile_risk(args.credit_score, args.foir, stability);

    let output = RiskOutput {
        band: band.to_string(),
        score,
        credit_score: args.credit_score,
        foir: args.foir,
        stability,
    };
    Ok(serde_json::to_value(output)?)
}
