use serde::{Deserialize, Serialize};

/// Policy dials backing the mocked credit assessment. The figures are
/// configurable business parameters, not algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingConfig {
    /// Inclusive lower bound of the mock credit-score draw.
    pub credit_score_low: u16,
    /// Exclusive upper bound of the mock credit-score draw.
    pub credit_score_high: u16,
    /// Scores below this threshold are rejected.
    pub min_credit_score: u16,
    /// Eligible ceiling = monthly income times this many months.
    pub income_multiple_months: u64,
    /// Applications below this monthly income never reach evaluation.
    pub min_monthly_income: u64,
    /// Affordability limit applied when the product does not carry one.
    pub default_max_emi_ratio_pct: f64,
    /// Inclusive lower bound of the plan base-rate draw, percent.
    pub base_rate_low_pct: f64,
    /// Exclusive upper bound of the plan base-rate draw, percent.
    pub base_rate_high_pct: f64,
    /// Fraction of the eligible ceiling suggested after a rejection.
    pub reduced_amount_factor: f64,
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self {
            credit_score_low: 650,
            credit_score_high: 850,
            min_credit_score: 650,
            income_multiple_months: 48,
            min_monthly_income: 10_000,
            default_max_emi_ratio_pct: 50.0,
            base_rate_low_pct: 10.0,
            base_rate_high_pct: 14.0,
            reduced_amount_factor: 0.8,
        }
    }
}
