use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LoanMatchError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as annual percentages (8.35 = 8.35% p.a.).
pub type Percent = Decimal;

/// Dimensionless ratios (FOIR, stability, probabilities).
pub type Ratio = Decimal;

/// Loan product category. Each category maps to its own lender bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoanType {
    Home,
    Education,
    Personal,
    Business,
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Home => "Home",
            Self::Education => "Education",
            Self::Personal => "Personal",
            Self::Business => "Business",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LoanType {
    type Err = LoanMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "education" => Ok(Self::Education),
            "personal" => Ok(Self::Personal),
            "business" => Ok(Self::Business),
            other => Err(LoanMatchError::UnknownLoanType(other.to_string())),
        }
    }
}

/// Employment category with its income-continuity coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentCategory {
    Salaried,
    SelfEmployed,
    Freelancer,
}

impl EmploymentCategory {
    /// Stability coefficient in (0, 1]: the multiplier lenders apply to
    /// income continuity by employment kind.
    pub fn stability(&self) -> Ratio {
        match self {
            Self::Salaried => dec!(1.0),
            Self::SelfEmployed => dec!(0.85),
            Self::Freelancer => dec!(0.75),
        }
    }
}

impl std::fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Salaried => "salaried",
            Self::SelfEmployed => "self_employed",
            Self::Freelancer => "freelancer",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for EmploymentCategory {
    type Err = LoanMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "salaried" => Ok(Self::Salaried),
            "self_employed" | "self-employed" => Ok(Self::SelfEmployed),
            "freelancer" => Ok(Self::Freelancer),
            other => Err(LoanMatchError::InvalidInput {
                field: "employment".into(),
                reason: format!("unknown employment category '{other}'"),
            }),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_type_parses_case_insensitively() {
        assert_eq!("home".parse::<LoanType>().unwrap(), LoanType::Home);
        assert_eq!("EDUCATION".parse::<LoanType>().unwrap(), LoanType::Education);
    }

    #[test]
    fn test_loan_type_rejects_unknown() {
        assert!("payday".parse::<LoanType>().is_err());
    }

    #[test]
    fn test_stability_coefficients() {
        assert_eq!(EmploymentCategory::Salaried.stability(), dec!(1.0));
        assert_eq!(EmploymentCategory::SelfEmployed.stability(), dec!(0.85));
        assert_eq!(EmploymentCategory::Freelancer.stability(), dec!(0.75));
    }

    #[test]
    fn test_employment_accepts_both_separator_styles() {
        assert_eq!(
            "self-employed".parse::<EmploymentCategory>().unwrap(),
            EmploymentCategory::SelfEmployed
        );
        assert_eq!(
            "self_employed".parse::<EmploymentCategory>().unwrap(),
            EmploymentCategory::SelfEmployed
        );
    }
}
