mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::CatalogArgs;
use commands::emi::EmiArgs;
use commands::evaluate::EvaluateArgs;
use commands::risk::RiskArgs;

/// Loan eligibility decisions and ranked lender offers
#[derive(Parser)]
#[command(
    name = "lmx",
    version,
    about = "Loan eligibility decisions and ranked lender offers",
    long_about = "Evaluates an applicant profile against a lender catalog: EMI \
                  amortization, eligibility prediction (learned artifact or \
                  rules fallback), banded risk scoring, per-lender offer \
                  matching and ranking, and a plain-language explanation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an applicant and rank lender offers
    Evaluate(EvaluateArgs),
    /// Quote a standalone equated monthly installment
    Emi(EmiArgs),
    /// Score profile risk from credit, FOIR, and employment
    Risk(RiskArgs),
    /// Show the lender catalog
    Catalog(CatalogArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => commands::evaluate::run_evaluate(args),
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Risk(args) => commands::risk::run_risk(args),
        Commands::Catalog(args) => commands::catalog::run_catalog(args),
        Commands::Version => {
            println!("lmx {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
