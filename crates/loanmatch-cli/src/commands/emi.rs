use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use loanmatch_core::amortization::emi;

/// Arguments for a standalone EMI quote
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual rate as a percentage (e.g. 8.35)
    #[arg(long)]
    pub rate: Decimal,

    /// Term in months
    #[arg(long)]
    pub months: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct EmiOutput {
    monthly_payment: Decimal,
    total_payment: Decimal,
    total_interest: Decimal,
    principal: Decimal,
    annual_rate_pct: Decimal,
    months: u32,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = emi(args.principal, args.rate, args.months)?;
    let total = payment * Decimal::from(args.months);

    let output = EmiOutput {
        monthly_payment: payment.round_dp(2),
        total_payment: total.round_dp(2),
        total_interest: (total - args.principal).round_dp(2),
        principal: args.principal,
        annual_rate_pct: args.rate,
        months: args.months,
    };
    Ok(serde_json::to_value(output)?)
}
