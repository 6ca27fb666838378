use std::collections::BTreeMap;

use loanmatch_core::amortization::emi;
use loanmatch_core::catalog::{LenderCatalog, LenderProduct};
use loanmatch_core::offers::{build_offers, OfferTag, RATE_FLOOR_PCT};
use loanmatch_core::predictor::Decision;
use loanmatch_core::profile::{ApplicantInput, ApplicantProfile};
use loanmatch_core::types::{EmploymentCategory, LoanType};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn home_applicant(income: Decimal, existing_emi: Decimal, credit: u16) -> ApplicantProfile {
    ApplicantProfile::from_input(ApplicantInput {
        full_name: "Test".into(),
        age: 35,
        employment: EmploymentCategory::Salaried,
        monthly_income: income,
        monthly_expenses: dec!(0),
        existing_emi,
        credit_score: credit,
        loan_amount: dec!(1000000),
        tenure_months: 120,
        loan_type: LoanType::Home,
    })
    .unwrap()
}

fn catalog_of(products: Vec<LenderProduct>) -> LenderCatalog {
    let mut map = BTreeMap::new();
    map.insert(LoanType::Home, products);
    LenderCatalog::new(map)
}

fn lender(name: &str, base_rate: Decimal) -> LenderProduct {
    LenderProduct {
        name: name.into(),
        base_rate,
        min_credit: 650,
        max_foir: dec!(0.60),
        processing_fee: dec!(0.5),
    }
}

// ===========================================================================
// Ranking
// ===========================================================================

#[test]
fn test_equal_rates_rank_by_approval_fit() {
    // Both lenders floor to the same 7.75% quote, but the one with the
    // higher base rate earned a larger discount and therefore a better fit.
    let profile = home_applicant(dec!(50000), dec!(6000), 760);
    let catalog = catalog_of(vec![lender("Alpha", dec!(8.0)), lender("Beta", dec!(8.1))]);

    let offers = build_offers(&profile, &catalog, Decision::Approve, 30).unwrap();

    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].effective_rate, RATE_FLOOR_PCT);
    assert_eq!(offers[1].effective_rate, RATE_FLOOR_PCT);
    // Beta was declared second but outranks Alpha on fit
    assert_eq!(offers[0].bank, "Beta");
    assert_eq!(offers[1].bank, "Alpha");
    assert!(offers[0].approval_fit > offers[1].approval_fit);
}

#[test]
fn test_full_key_tie_preserves_declaration_order() {
    let profile = home_applicant(dec!(50000), dec!(6000), 760);
    let catalog = catalog_of(vec![lender("First", dec!(8.0)), lender("Second", dec!(8.0))]);

    let offers = build_offers(&profile, &catalog, Decision::Approve, 30).unwrap();

    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].effective_rate, offers[1].effective_rate);
    assert_eq!(offers[0].approval_fit, offers[1].approval_fit);
    assert_eq!(offers[0].monthly_emi, offers[1].monthly_emi);
    assert_eq!(offers[0].bank, "First");
    assert_eq!(offers[1].bank, "Second");
}

#[test]
fn test_three_key_order_over_builtin_catalog() {
    let profile = home_applicant(dec!(90000), dec!(4000), 780);
    let catalog = LenderCatalog::builtin();
    let offers = build_offers(&profile, &catalog, Decision::Approve, 88).unwrap();
    assert!(offers.len() >= 2);
    for pair in offers.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let ordered = a.effective_rate < b.effective_rate
            || (a.effective_rate == b.effective_rate && a.approval_fit > b.approval_fit)
            || (a.effective_rate == b.effective_rate
                && a.approval_fit == b.approval_fit
                && a.monthly_emi <= b.monthly_emi);
        assert!(ordered);
    }
}

// ===========================================================================
// Rounding and derived figures
// ===========================================================================

#[test]
fn test_offer_figures_round_consistently() {
    let profile = home_applicant(dec!(80000), dec!(5000), 780);
    let catalog = catalog_of(vec![lender("Quote Bank", dec!(8.35))]);

    let offers = build_offers(&profile, &catalog, Decision::Approve, 95).unwrap();
    assert_eq!(offers.len(), 1);
    let offer = &offers[0];

    // Credit -0.35, FOIR -0.1, stability -0.1
    assert_eq!(offer.effective_rate, dec!(7.80));

    let raw_emi = emi(dec!(1000000), dec!(7.80), 120).unwrap();
    assert_eq!(offer.monthly_emi, raw_emi.round());

    let expected_total = (raw_emi * dec!(120) + dec!(1000000) * dec!(0.005)).round();
    assert_eq!(offer.total_payable, expected_total);

    let expected_foir_pct = ((dec!(5000) + raw_emi) / dec!(80000) * dec!(100)).round_dp(1);
    assert_eq!(offer.actual_foir_pct, expected_foir_pct);

    assert_eq!(offer.processing_fee, dec!(0.50));
    assert_eq!(offer.tag, OfferTag::BestRate);
}

#[test]
fn test_no_offers_for_denied_regardless_of_confidence() {
    let profile = home_applicant(dec!(80000), dec!(5000), 780);
    let catalog = LenderCatalog::builtin();
    for confidence in [0u8, 50, 95] {
        let offers = build_offers(&profile, &catalog, Decision::Deny, confidence).unwrap();
        assert!(offers.is_empty());
    }
}
