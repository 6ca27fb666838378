//! Eligibility prediction: learned artifact or rules-based fallback.
//!
//! Both variants share one capability — a binary decision plus an approval
//! probability over the same three-feature vector — so every downstream
//! component is indifferent to which one is installed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::profile::ApplicantProfile;
use crate::types::{Money, Ratio};
use crate::LoanMatchResult;

// ---------------------------------------------------------------------------
// Features and decisions
// ---------------------------------------------------------------------------

/// The minimal feature vector both model variants consume.
/// Field order is part of the artifact contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Features {
    pub monthly_income: Money,
    pub loan_amount: Money,
    pub credit_score: u16,
}

impl Features {
    pub fn from_profile(profile: &ApplicantProfile) -> Self {
        Self {
            monthly_income: profile.monthly_income,
            loan_amount: profile.loan_amount,
            credit_score: profile.credit_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Deny,
}

impl Decision {
    pub fn is_approve(&self) -> bool {
        matches!(self, Decision::Approve)
    }
}

/// The capability both model variants implement. Swapping implementations
/// must never change downstream control flow, only the decision and
/// probability values.
pub trait EligibilityModel: Send + Sync {
    fn predict(&self, features: &Features) -> Decision;
    fn predict_probability(&self, features: &Features) -> Ratio;
}

// ---------------------------------------------------------------------------
// Rules-based fallback
// ---------------------------------------------------------------------------

const PROBABILITY_FLOOR: Decimal = dec!(0.05);
const PROBABILITY_CEILING: Decimal = dec!(0.95);

/// Deterministic fallback used when no learned artifact is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackRulesModel;

impl EligibilityModel for FallbackRulesModel {
    fn predict(&self, features: &Features) -> Decision {
        let income_gate = features.monthly_income >= features.loan_amount / dec!(120);
        let credit_gate = features.credit_score >= 650;
        if income_gate && credit_gate {
            Decision::Approve
        } else {
            Decision::Deny
        }
    }

    fn predict_probability(&self, features: &Features) -> Ratio {
        let credit = Decimal::from(features.credit_score);
        let mut score = dec!(0.22);
        score += ((credit - dec!(500)) / dec!(360)).clamp(Decimal::ZERO, dec!(0.53));
        score += ((features.monthly_income - features.loan_amount / dec!(120)) / dec!(120000))
            .clamp(Decimal::ZERO, dec!(0.2));
        score.clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING)
    }
}

// ---------------------------------------------------------------------------
// Learned artifact
// ---------------------------------------------------------------------------

/// A trained logistic artifact, deserialized from JSON at process start.
///
/// The artifact's internals are opaque to the engine; it only has to honor
/// the fallback's feature order and output shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnedModel {
    pub intercept: Decimal,
    pub income_weight: Decimal,
    pub loan_amount_weight: Decimal,
    pub credit_score_weight: Decimal,
    #[serde(default = "default_threshold")]
    pub threshold: Ratio,
}

fn default_threshold() -> Ratio {
    dec!(0.5)
}

impl LearnedModel {
    pub fn from_json_str(artifact: &str) -> LoanMatchResult<Self> {
        Ok(serde_json::from_str(artifact)?)
    }

    fn linear_score(&self, features: &Features) -> Decimal {
        self.intercept
            + self.income_weight * features.monthly_income
            + self.loan_amount_weight * features.loan_amount
            + self.credit_score_weight * Decimal::from(features.credit_score)
    }
}

impl EligibilityModel for LearnedModel {
    fn predict(&self, features: &Features) -> Decision {
        if self.predict_probability(features) >= self.threshold {
            Decision::Approve
        } else {
            Decision::Deny
        }
    }

    fn predict_probability(&self, features: &Features) -> Ratio {
        sigmoid(self.linear_score(features))
    }
}

/// Logistic function 1 / (1 + e^-x) in Decimal.
fn sigmoid(x: Decimal) -> Decimal {
    // Saturate well before decimal_exp loses precision; the probability is
    // already indistinguishable from 0/1 out here.
    if x > dec!(30) {
        return Decimal::ONE;
    }
    if x < dec!(-30) {
        return Decimal::ZERO;
    }
    let e = decimal_exp(-x);
    Decimal::ONE / (Decimal::ONE + e)
}

/// e^x via Taylor series with ln(2) range reduction: x = n*ln2 + r,
/// e^x = 2^n * e^r with |r| <= ln2/2.
fn decimal_exp(x: Decimal) -> Decimal {
    let ln2 = dec!(0.6931471805599453);
    let n = (x / ln2).round();
    let r = x - n * ln2;

    // e^r = sum r^k / k!
    let mut term = Decimal::ONE;
    let mut sum = Decimal::ONE;
    for k in 1u32..25 {
        term = term * r / Decimal::from(k);
        sum += term;
    }

    let n_int = match n.to_i64() {
        Some(v) => v,
        None => return if x > Decimal::ZERO { Decimal::MAX } else { Decimal::ZERO },
    };

    let mut result = sum;
    if n_int >= 0 {
        for _ in 0..n_int {
            result *= dec!(2);
        }
    } else {
        for _ in 0..(-n_int) {
            result /= dec!(2);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Selection policy
// ---------------------------------------------------------------------------

/// Which variant ended up installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    Learned,
    FallbackRules,
}

/// The model chosen at startup, plus the substitution notice when the
/// fallback had to stand in for a missing artifact.
pub struct ModelSelection {
    model: Box<dyn EligibilityModel>,
    pub source: ModelSource,
    pub notice: Option<String>,
}

impl ModelSelection {
    /// Prefer the learned artifact when one was supplied; otherwise install
    /// the rules-based fallback. The substitution is a notice, never an
    /// error.
    pub fn prefer_learned(artifact: Option<LearnedModel>) -> Self {
        match artifact {
            Some(model) => Self {
                model: Box::new(model),
                source: ModelSource::Learned,
                notice: None,
            },
            None => Self {
                model: Box::new(FallbackRulesModel),
                source: ModelSource::FallbackRules,
                notice: Some(
                    "No learned artifact available; using the rules-based fallback model."
                        .to_string(),
                ),
            },
        }
    }

    /// Install an arbitrary implementation. Intended for callers that manage
    /// their own artifacts (and for substitutability tests).
    pub fn custom(model: Box<dyn EligibilityModel>, source: ModelSource) -> Self {
        Self {
            model,
            source,
            notice: None,
        }
    }

    pub fn model(&self) -> &dyn EligibilityModel {
        self.model.as_ref()
    }
}
