//! Per-lender offer construction and ranking.
//!
//! 1. Hard short-circuit: a denied prediction yields no offers at all.
//! 2. Filter: lender credit floor, then post-EMI affordability (FOIR cap).
//! 3. Price: base rate plus banded credit/FOIR/stability adjustments,
//!    floored at [`RATE_FLOOR_PCT`].
//! 4. Rank: rate ascending, approval fit descending, EMI ascending;
//!    catalog declaration order breaks any remaining ties.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::emi;
use crate::catalog::LenderCatalog;
use crate::predictor::Decision;
use crate::profile::ApplicantProfile;
use crate::types::{Money, Percent, Ratio};
use crate::LoanMatchResult;

/// No effective rate is ever quoted below this.
pub const RATE_FLOOR_PCT: Percent = dec!(7.75);

const FIT_FLOOR: Decimal = dec!(35);
const FIT_CEILING: Decimal = dec!(98);

/// Marketing tag attached to each offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferTag {
    #[serde(rename = "Best Rate")]
    BestRate,
    #[serde(rename = "Fast Approval")]
    FastApproval,
}

impl std::fmt::Display for OfferTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BestRate => "Best Rate",
            Self::FastApproval => "Fast Approval",
        };
        write!(f, "{}", s)
    }
}

/// One qualifying lender's terms for this applicant. Transient: identity is
/// its position in the ranked sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub bank: String,
    /// Adjusted annual rate, 2 decimal places.
    pub effective_rate: Percent,
    /// Monthly installment, rounded to whole currency units.
    pub monthly_emi: Money,
    /// Installments over the full tenure plus the processing fee, rounded
    /// to whole currency units.
    pub total_payable: Money,
    /// Processing fee as a percentage of principal, 2 decimal places.
    pub processing_fee: Percent,
    /// Synthetic 0-100 estimate of how favorably this lender views the
    /// applicant; distinct from overall eligibility confidence.
    pub approval_fit: i32,
    /// Post-EMI FOIR as a percentage, 1 decimal place.
    pub actual_foir_pct: Ratio,
    pub tag: OfferTag,
}

/// Build and rank offers for the applicant's loan category.
///
/// Pure: identical inputs always produce the identical ordered sequence.
pub fn build_offers(
    profile: &ApplicantProfile,
    catalog: &LenderCatalog,
    decision: Decision,
    confidence_pct: u8,
) -> LoanMatchResult<Vec<Offer>> {
    let mut offers = Vec::new();

    if !decision.is_approve() {
        return Ok(offers);
    }

    let confidence = Decimal::from(confidence_pct);

    for lender in catalog.products_for(profile.loan_type)? {
        if profile.credit_score < lender.min_credit {
            continue;
        }

        let effective_rate = effective_rate_for(profile, lender.base_rate);

        let monthly_emi = emi(profile.loan_amount, effective_rate, profile.tenure_months)?;
        let actual_foir = (profile.existing_emi + monthly_emi) / profile.monthly_income;

        if actual_foir > lender.max_foir {
            continue;
        }

        let processing = profile.loan_amount * (lender.processing_fee / dec!(100));
        let total_payable = monthly_emi * Decimal::from(profile.tenure_months) + processing;

        let mut fit = dec!(100);
        fit -= (effective_rate - lender.base_rate) * dec!(10);
        fit -= (actual_foir - dec!(0.35)).max(Decimal::ZERO) * dec!(120);
        fit += (confidence - dec!(50)) * dec!(0.2);
        let approval_fit = fit
            .clamp(FIT_FLOOR, FIT_CEILING)
            .trunc()
            .to_i32()
            .unwrap_or(0);

        offers.push(Offer {
            bank: lender.name.clone(),
            effective_rate,
            monthly_emi: monthly_emi.round(),
            total_payable: total_payable.round(),
            processing_fee: lender.processing_fee.round_dp(2),
            approval_fit,
            actual_foir_pct: (actual_foir * dec!(100)).round_dp(1),
            tag: if effective_rate <= lender.base_rate {
                OfferTag::BestRate
            } else {
                OfferTag::FastApproval
            },
        });
    }

    // Stable sort: catalog declaration order survives full-key ties.
    offers.sort_by(|a, b| {
        a.effective_rate
            .cmp(&b.effective_rate)
            .then_with(|| b.approval_fit.cmp(&a.approval_fit))
            .then_with(|| a.monthly_emi.cmp(&b.monthly_emi))
    });

    Ok(offers)
}

/// Base rate plus banded credit/FOIR/stability adjustments, floored and
/// rounded to 2 decimal places.
fn effective_rate_for(profile: &ApplicantProfile, base_rate: Percent) -> Percent {
    let credit_adjustment = if profile.credit_score >= 760 {
        dec!(-0.35)
    } else if profile.credit_score >= 720 {
        dec!(-0.15)
    } else {
        dec!(0.2)
    };

    let foir_adjustment = if profile.baseline_foir <= dec!(0.4) {
        dec!(-0.1)
    } else if profile.baseline_foir > dec!(0.5) {
        dec!(0.25)
    } else {
        Decimal::ZERO
    };

    let stability_adjustment = if profile.stability >= dec!(1.0) {
        dec!(-0.1)
    } else if profile.stability < dec!(0.8) {
        dec!(0.2)
    } else {
        Decimal::ZERO
    };

    (base_rate + credit_adjustment + foir_adjustment + stability_adjustment)
        .max(RATE_FLOOR_PCT)
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LenderProduct;
    use crate::profile::ApplicantInput;
    use crate::types::{EmploymentCategory, LoanType};
    use rust_decimal_macros::dec;

    fn strong_home_applicant() -> ApplicantProfile {
        ApplicantProfile::from_input(ApplicantInput {
            full_name: "Asha Verma".into(),
            age: 34,
            employment: EmploymentCategory::Salaried,
            monthly_income: dec!(80000),
            monthly_expenses: dec!(20000),
            existing_emi: dec!(5000),
            credit_score: 780,
            loan_amount: dec!(2000000),
            tenure_months: 240,
            loan_type: LoanType::Home,
        })
        .unwrap()
    }

    #[test]
    fn test_denied_prediction_yields_no_offers() {
        let profile = strong_home_applicant();
        let catalog = LenderCatalog::builtin();
        let offers = build_offers(&profile, &catalog, Decision::Deny, 95).unwrap();
        assert!(offers.is_empty());
    }

    #[test]
    fn test_strong_applicant_receives_full_discount() {
        let profile = strong_home_applicant();
        let catalog = LenderCatalog::builtin();
        let offers = build_offers(&profile, &catalog, Decision::Approve, 95).unwrap();

        // Credit -0.35, FOIR -0.1, stability -0.1: every base rate drops 0.55
        assert_eq!(offers.len(), 4);
        assert_eq!(offers[0].bank, "SBI");
        assert_eq!(offers[0].effective_rate, dec!(7.80));
        assert_eq!(offers[0].tag, OfferTag::BestRate);
    }

    #[test]
    fn test_rate_floor_binds() {
        let input = ApplicantInput {
            full_name: "Test".into(),
            age: 30,
            employment: EmploymentCategory::Salaried,
            monthly_income: dec!(300000),
            monthly_expenses: dec!(0),
            existing_emi: dec!(0),
            credit_score: 800,
            loan_amount: dec!(1000000),
            tenure_months: 120,
            loan_type: LoanType::Home,
        };
        let profile = ApplicantProfile::from_input(input).unwrap();
        // SBI home base 8.35 - 0.55 = 7.80 stays above the floor; force the
        // floor with a synthetic cheap product.
        let mut products = std::collections::BTreeMap::new();
        products.insert(
            LoanType::Home,
            vec![LenderProduct {
                name: "Teaser Bank".into(),
                base_rate: dec!(8.0),
                min_credit: 650,
                max_foir: dec!(0.6),
                processing_fee: dec!(0.5),
            }],
        );
        let catalog = LenderCatalog::new(products);
        let offers = build_offers(&profile, &catalog, Decision::Approve, 90).unwrap();
        // 8.0 - 0.55 = 7.45 would breach the floor
        assert_eq!(offers[0].effective_rate, RATE_FLOOR_PCT);
    }

    #[test]
    fn test_credit_floor_filters_lender() {
        let mut profile = strong_home_applicant();
        profile.credit_score = 690;
        let catalog = LenderCatalog::builtin();
        let offers = build_offers(&profile, &catalog, Decision::Approve, 70).unwrap();
        // Only SBI (680) admits a 690 score in the Home bucket
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].bank, "SBI");
    }

    #[test]
    fn test_affordability_filter_rejects_high_foir() {
        let profile = ApplicantProfile::from_input(ApplicantInput {
            full_name: "Test".into(),
            age: 40,
            employment: EmploymentCategory::Salaried,
            monthly_income: dec!(40000),
            monthly_expenses: dec!(5000),
            existing_emi: dec!(15000),
            credit_score: 780,
            loan_amount: dec!(2000000),
            tenure_months: 240,
            loan_type: LoanType::Home,
        })
        .unwrap();
        let catalog = LenderCatalog::builtin();
        // (15000 + ~16500) / 40000 ~ 0.79 exceeds every max_foir
        let offers = build_offers(&profile, &catalog, Decision::Approve, 90).unwrap();
        assert!(offers.is_empty());
    }

    #[test]
    fn test_approval_fit_clamped_to_ceiling() {
        let profile = strong_home_applicant();
        let catalog = LenderCatalog::builtin();
        let offers = build_offers(&profile, &catalog, Decision::Approve, 95).unwrap();
        // 100 + 5.5 - 0 + 9 = 114.5 before the clamp
        assert_eq!(offers[0].approval_fit, 98);
    }

    #[test]
    fn test_ranking_contract() {
        let profile = strong_home_applicant();
        let catalog = LenderCatalog::builtin();
        let offers = build_offers(&profile, &catalog, Decision::Approve, 95).unwrap();
        for pair in offers.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let ordered = a.effective_rate < b.effective_rate
                || (a.effective_rate == b.effective_rate && a.approval_fit > b.approval_fit)
                || (a.effective_rate == b.effective_rate
                    && a.approval_fit == b.approval_fit
                    && a.monthly_emi <= b.monthly_emi);
            assert!(ordered, "offers out of order: {a:?} then {b:?}");
        }
    }

    #[test]
    fn test_build_offers_is_idempotent() {
        let profile = strong_home_applicant();
        let catalog = LenderCatalog::builtin();
        let first = build_offers(&profile, &catalog, Decision::Approve, 95).unwrap();
        let second = build_offers(&profile, &catalog, Decision::Approve, 95).unwrap();
        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fast_approval_tag_when_rate_rises() {
        let profile = ApplicantProfile::from_input(ApplicantInput {
            full_name: "Test".into(),
            age: 28,
            employment: EmploymentCategory::Freelancer,
            monthly_income: dec!(90000),
            monthly_expenses: dec!(10000),
            existing_emi: dec!(0),
            credit_score: 700,
            loan_amount: dec!(800000),
            tenure_months: 60,
            loan_type: LoanType::Education,
        })
        .unwrap();
        let catalog = LenderCatalog::builtin();
        let offers = build_offers(&profile, &catalog, Decision::Approve, 70).unwrap();
        assert!(!offers.is_empty());
        // Credit +0.2, stability +0.2 push every rate above base
        for offer in &offers {
            assert_eq!(offer.tag, OfferTag::FastApproval);
        }
    }
}
