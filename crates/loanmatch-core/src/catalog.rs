use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::LoanMatchError;
use crate::types::{LoanType, Percent, Ratio};
use crate::LoanMatchResult;

/// A single lender product: one bank's terms for one loan category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderProduct {
    pub name: String,
    /// Published annual rate before applicant-specific adjustments.
    pub base_rate: Percent,
    /// Minimum credit score the lender will consider.
    pub min_credit: u16,
    /// Maximum fixed-obligation-to-income ratio the lender tolerates.
    pub max_foir: Ratio,
    /// Processing fee as a percentage of the principal.
    pub processing_fee: Percent,
}

/// Read-only lender table keyed by loan category.
///
/// Built once at startup and shared by reference; declaration order within a
/// bucket is the final ranking tie-break, so it is preserved as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderCatalog {
    products: BTreeMap<LoanType, Vec<LenderProduct>>,
}

impl LenderCatalog {
    pub fn new(products: BTreeMap<LoanType, Vec<LenderProduct>>) -> Self {
        Self { products }
    }

    /// The ordered bucket for a loan category, or `UnknownLoanType` when the
    /// catalog carries no products for it.
    pub fn products_for(&self, loan_type: LoanType) -> LoanMatchResult<&[LenderProduct]> {
        self.products
            .get(&loan_type)
            .map(Vec::as_slice)
            .ok_or_else(|| LoanMatchError::UnknownLoanType(loan_type.to_string()))
    }

    pub fn loan_types(&self) -> impl Iterator<Item = LoanType> + '_ {
        self.products.keys().copied()
    }

    /// The stock lender table shipped with the engine.
    pub fn builtin() -> Self {
        let mut products = BTreeMap::new();

        products.insert(
            LoanType::Home,
            vec![
                product("SBI", dec!(8.35), 680, dec!(0.55), dec!(0.6)),
                product("HDFC", dec!(8.55), 710, dec!(0.52), dec!(0.75)),
                product("Axis", dec!(8.72), 695, dec!(0.54), dec!(0.7)),
                product("ICICI", dec!(8.68), 700, dec!(0.53), dec!(0.8)),
            ],
        );
        products.insert(
            LoanType::Education,
            vec![
                product("SBI", dec!(8.95), 650, dec!(0.58), dec!(0.5)),
                product("Bank of Baroda", dec!(9.1), 640, dec!(0.59), dec!(0.4)),
                product("Axis", dec!(9.25), 655, dec!(0.57), dec!(0.65)),
            ],
        );
        products.insert(
            LoanType::Personal,
            vec![
                product("HDFC", dec!(11.2), 730, dec!(0.48), dec!(1.3)),
                product("ICICI", dec!(11.45), 725, dec!(0.5), dec!(1.1)),
                product("Axis", dec!(11.8), 710, dec!(0.5), dec!(1.2)),
            ],
        );
        products.insert(
            LoanType::Business,
            vec![
                product("HDFC", dec!(10.45), 700, dec!(0.55), dec!(1.0)),
                product("ICICI", dec!(10.8), 695, dec!(0.56), dec!(1.1)),
                product("Kotak", dec!(10.95), 690, dec!(0.57), dec!(0.95)),
            ],
        );

        Self { products }
    }
}

fn product(
    name: &str,
    base_rate: Percent,
    min_credit: u16,
    max_foir: Ratio,
    processing_fee: Percent,
) -> LenderProduct {
    LenderProduct {
        name: name.to_string(),
        base_rate,
        min_credit,
        max_foir,
        processing_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_loan_type() {
        let catalog = LenderCatalog::builtin();
        for lt in [
            LoanType::Home,
            LoanType::Education,
            LoanType::Personal,
            LoanType::Business,
        ] {
            assert!(!catalog.products_for(lt).unwrap().is_empty());
        }
    }

    #[test]
    fn test_bucket_order_is_declaration_order() {
        let catalog = LenderCatalog::builtin();
        let home = catalog.products_for(LoanType::Home).unwrap();
        let names: Vec<&str> = home.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["SBI", "HDFC", "Axis", "ICICI"]);
    }

    #[test]
    fn test_missing_bucket_is_unknown_loan_type() {
        let catalog = LenderCatalog::new(BTreeMap::new());
        let err = catalog.products_for(LoanType::Home).unwrap_err();
        assert!(matches!(err, LoanMatchError::UnknownLoanType(_)));
    }

    #[test]
    fn test_catalog_roundtrips_through_json() {
        let catalog = LenderCatalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: LenderCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.products_for(LoanType::Personal).unwrap().len(),
            catalog.products_for(LoanType::Personal).unwrap().len()
        );
    }
}
