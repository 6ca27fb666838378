use clap::Args;
use serde_json::Value;

use loanmatch_core::catalog::LenderCatalog;
use loanmatch_core::types::LoanType;

use crate::input;

/// Arguments for inspecting the lender catalog
#[derive(Args)]
pub struct CatalogArgs {
    /// Path to a lender catalog file (defaults to the builtin table)
    #[arg(long)]
    pub input: Option<String>,

    /// Show only one loan category: home, education, personal, business
    #[arg(long)]
    pub loan_type: Option<String>,
}

pub fn run_catalog(args: CatalogArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog: LenderCatalog = match args.input {
        Some(ref path) => input::file::read_document(path)?,
        None => LenderCatalog::builtin(),
    };

    match args.loan_type {
        Some(ref raw) => {
            let loan_type: LoanType = raw.parse()?;
            let products = catalog.products_for(loan_type)?;
            Ok(serde_json::to_value(products)?)
        }
        None => Ok(serde_json::to_value(&catalog)?),
    }
}
