use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanMatchError;
use crate::types::{Money, Percent};
use crate::LoanMatchResult;

/// Equated monthly installment under standard amortization.
///
/// `annual_rate_pct` is a percentage (8.35 = 8.35% p.a.). A zero rate
/// degenerates to straight-line repayment, handled explicitly so the
/// compound formula never divides by zero.
pub fn emi(principal: Money, annual_rate_pct: Percent, months: u32) -> LoanMatchResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if months == 0 {
        return Err(LoanMatchError::InvalidInput {
            field: "months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanMatchError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Rate must not be negative".into(),
        });
    }

    let monthly_rate = annual_rate_pct / dec!(12) / dec!(100);

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let factor = (Decimal::ONE + monthly_rate).powd(Decimal::from(months));
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanMatchError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    Ok(principal * monthly_rate * factor / denominator)
}
