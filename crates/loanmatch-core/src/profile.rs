use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::emi;
use crate::error::LoanMatchError;
use crate::types::{EmploymentCategory, LoanType, Money, Percent, Ratio};
use crate::LoanMatchResult;

/// Reference rate used for the baseline FOIR, before any lender-specific
/// rate adjustment is known.
pub const BASELINE_RATE_PCT: Percent = dec!(10.0);

/// Raw applicant data as supplied by the (out-of-scope) intake layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantInput {
    #[serde(default = "default_full_name")]
    pub full_name: String,
    pub age: u8,
    pub employment: EmploymentCategory,
    pub monthly_income: Money,
    #[serde(default)]
    pub monthly_expenses: Money,
    #[serde(default)]
    pub existing_emi: Money,
    pub credit_score: u16,
    pub loan_amount: Money,
    pub tenure_months: u32,
    pub loan_type: LoanType,
}

fn default_full_name() -> String {
    "Applicant".to_string()
}

/// Validated applicant profile with derived fields computed once.
///
/// Range validation (age band, credit score band) is the intake layer's
/// responsibility; construction only guards the degenerate numeric inputs
/// that would poison downstream arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub full_name: String,
    pub age: u8,
    pub employment: EmploymentCategory,
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub existing_emi: Money,
    pub credit_score: u16,
    pub loan_amount: Money,
    pub tenure_months: u32,
    pub loan_type: LoanType,
    /// Income-continuity coefficient for the employment category.
    pub stability: Ratio,
    /// max(income - expenses - existing EMI, 0)
    pub disposable_income: Money,
    /// (existing EMI + EMI at the reference rate) / income
    pub baseline_foir: Ratio,
}

impl ApplicantProfile {
    pub fn from_input(input: ApplicantInput) -> LoanMatchResult<Self> {
        if input.monthly_income <= Decimal::ZERO {
            return Err(LoanMatchError::InvalidProfile {
                field: "monthly_income".into(),
                reason: "Monthly income must be positive".into(),
            });
        }
        if input.loan_amount <= Decimal::ZERO {
            return Err(LoanMatchError::InvalidProfile {
                field: "loan_amount".into(),
                reason: "Loan amount must be positive".into(),
            });
        }
        if input.tenure_months == 0 {
            return Err(LoanMatchError::InvalidProfile {
                field: "tenure_months".into(),
                reason: "Tenure must be at least one month".into(),
            });
        }
        if input.monthly_expenses < Decimal::ZERO {
            return Err(LoanMatchError::InvalidProfile {
                field: "monthly_expenses".into(),
                reason: "Expenses cannot be negative".into(),
            });
        }
        if input.existing_emi < Decimal::ZERO {
            return Err(LoanMatchError::InvalidProfile {
                field: "existing_emi".into(),
                reason: "Existing EMI cannot be negative".into(),
            });
        }

        let stability = input.employment.stability();

        let disposable_income = (input.monthly_income
            - input.monthly_expenses
            - input.existing_emi)
            .max(Decimal::ZERO);

        let baseline_emi = emi(input.loan_amount, BASELINE_RATE_PCT, input.tenure_months)?;
        let baseline_foir = (input.existing_emi + baseline_emi) / input.monthly_income;

        Ok(Self {
            full_name: input.full_name,
            age: input.age,
            employment: input.employment,
            monthly_income: input.monthly_income,
            monthly_expenses: input.monthly_expenses,
            existing_emi: input.existing_emi,
            credit_score: input.credit_score,
            loan_amount: input.loan_amount,
            tenure_months: input.tenure_months,
            loan_type: input.loan_type,
            stability,
            disposable_income,
            baseline_foir,
        })
    }
}
