use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::Value;

use loanmatch_core::catalog::LenderCatalog;
use loanmatch_core::engine::evaluate;
use loanmatch_core::predictor::{LearnedModel, ModelSelection};
use loanmatch_core::profile::{ApplicantInput, ApplicantProfile};

use crate::input;

/// Arguments for a full applicant evaluation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EvaluateArgs {
    /// Path to JSON/YAML applicant profile (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Applicant display name
    #[arg(long, default_value = "Applicant")]
    pub full_name: String,

    /// Applicant age in years
    #[arg(long)]
    pub age: Option<u8>,

    /// Employment category: salaried, self_employed, freelancer
    #[arg(long, default_value = "salaried")]
    pub employment: String,

    /// Monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Monthly living expenses
    #[arg(long, default_value = "0")]
    pub monthly_expenses: Decimal,

    /// Existing EMI obligations
    #[arg(long, default_value = "0")]
    pub existing_emi: Decimal,

    /// Credit score (300-900)
    #[arg(long)]
    pub credit_score: Option<u16>,

    /// Requested loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure_months: Option<u32>,

    /// Loan category: home, education, personal, business
    #[arg(long)]
    pub loan_type: Option<String>,

    /// Path to a lender catalog file (defaults to the builtin table)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Path to a learned eligibility artifact (falls back to rules when absent)
    #[arg(long)]
    pub model: Option<String>,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let applicant: ApplicantInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ApplicantInput {
            full_name: args.full_name.clone(),
            age: args.age.ok_or("--age is required (or provide --input)")?,
            employment: args.employment.parse()?,
            monthly_income: args
                .monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            monthly_expenses: args.monthly_expenses,
            existing_emi: args.existing_emi,
            credit_score: args
                .credit_score
                .ok_or("--credit-score is required (or provide --input)")?,
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
            loan_type: args
                .loan_type
                .as_deref()
                .ok_or("--loan-type is required (or provide --input)")?
                .parse()?,
        }
    };

    let profile = ApplicantProfile::from_input(applicant)?;

    let catalog: LenderCatalog = match args.catalog {
        Some(ref path) => input::file::read_document(path)?,
        None => LenderCatalog::builtin(),
    };

    let selection = load_model(args.model.as_deref());
    if let Some(ref notice) = selection.notice {
        eprintln!("{}: {}", "notice".yellow().bold(), notice);
    }

    let result = evaluate(&profile, &catalog, selection.model())?;
    Ok(serde_json::to_value(result)?)
}

/// Prefer a learned artifact when the file loads; any failure falls back to
/// the rules model with a notice, never an error.
fn load_model(path: Option<&str>) -> ModelSelection {
    let artifact = path.and_then(|p| match input::file::read_document::<LearnedModel>(p) {
        Ok(model) => Some(model),
        Err(e) => {
            eprintln!(
                "{}: could not load model artifact '{}': {}",
                "notice".yellow().bold(),
                p,
                e
            );
            None
        }
    });
    ModelSelection::prefer_learned(artifact)
}
