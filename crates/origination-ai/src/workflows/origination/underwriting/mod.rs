//! Mocked credit assessment: score draw, eligibility ceiling, affordability
//! check, and repayment-plan synthesis around a randomized base rate.

mod config;
mod policy;
pub mod random;

pub use config::UnderwritingConfig;
pub use policy::RejectionReason;

use serde::{Deserialize, Serialize};

use super::catalog::MIN_TENURE_MONTHS;
use super::domain::{LoanDecision, LoanPlan, LoanRequest, PlanTier};
use super::emi::{compute_emi, EmiError};
use policy::{collect_rejections, EligibilitySignals};
use random::RandomSource;

const ECONOMY_RATE_SPREAD_PCT: f64 = 2.0;
const PREMIUM_RATE_DISCOUNT_PCT: f64 = 1.5;
const ECONOMY_TENURE_EXTENSION_MONTHS: u32 = 12;
const PREMIUM_TENURE_REDUCTION_MONTHS: u32 = 6;

/// Result of one underwriting pass. Created `pending`, populated exactly
/// once per stage entry, and only replaced wholesale on re-entry or reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingOutcome {
    pub credit_score: u16,
    pub eligible_amount: u64,
    pub emi_ratio_pct: f64,
    pub decision: LoanDecision,
    pub rejection_reasons: Vec<RejectionReason>,
    pub offers: Vec<LoanPlan>,
    pub suggested_amount: Option<u64>,
    pub selected_plan: Option<LoanPlan>,
}

impl UnderwritingOutcome {
    pub fn pending() -> Self {
        Self {
            credit_score: 0,
            eligible_amount: 0,
            emi_ratio_pct: 0.0,
            decision: LoanDecision::Pending,
            rejection_reasons: Vec::new(),
            offers: Vec::new(),
            suggested_amount: None,
            selected_plan: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.decision == LoanDecision::Pending
    }

    pub fn is_approved(&self) -> bool {
        self.decision == LoanDecision::Approved
    }

    pub fn offer(&self, tier: PlanTier) -> Option<&LoanPlan> {
        self.offers.iter().find(|plan| plan.tier == tier)
    }

    pub fn decision_rationale(&self) -> String {
        match self.decision {
            LoanDecision::Pending => "pending credit assessment".to_string(),
            LoanDecision::Approved => match &self.selected_plan {
                Some(plan) => format!(
                    "approved: {} @ {}% p.a.",
                    plan.tier.label(),
                    plan.interest_rate_pct
                ),
                None => format!(
                    "approved at credit score {}; {} plan offers available",
                    self.credit_score,
                    self.offers.len()
                ),
            },
            LoanDecision::Rejected => {
                let reasons: Vec<String> = self
                    .rejection_reasons
                    .iter()
                    .map(RejectionReason::summary)
                    .collect();
                format!("rejected: {}", reasons.join("; "))
            }
        }
    }
}

/// Stateless evaluator applying the policy configuration to a request.
/// Randomness comes in through the caller-owned [`RandomSource`].
#[derive(Debug, Clone)]
pub struct UnderwritingEngine {
    config: UnderwritingConfig,
}

impl UnderwritingEngine {
    pub fn new(config: UnderwritingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UnderwritingConfig {
        &self.config
    }

    /// Adjudicate a request against the verified monthly income.
    ///
    /// The caller enforces a positive income above the configured floor
    /// before invoking; given that, the only failure path is pricing a plan
    /// for a degenerate request, which bound validation rules out upstream.
    pub fn evaluate(
        &self,
        random: &mut dyn RandomSource,
        request: &LoanRequest,
        monthly_income: u64,
    ) -> Result<UnderwritingOutcome, EmiError> {
        let credit_score = random
            .next_in_range(
                self.config.credit_score_low as f64,
                self.config.credit_score_high as f64,
            )
            .floor() as u16;
        let eligible_amount = monthly_income.saturating_mul(self.config.income_multiple_months);
        let emi_ratio_pct = request.emi_ratio_pct(monthly_income);

        let signals = EligibilitySignals {
            credit_score,
            eligible_amount,
            emi_ratio_pct,
        };
        let rejection_reasons = collect_rejections(request, &self.config, &signals);

        if rejection_reasons.is_empty() {
            let offers = self.synthesize_offers(random, request)?;
            Ok(UnderwritingOutcome {
                credit_score,
                eligible_amount,
                emi_ratio_pct,
                decision: LoanDecision::Approved,
                rejection_reasons,
                offers,
                suggested_amount: None,
                selected_plan: None,
            })
        } else {
            let reduced =
                (eligible_amount as f64 * self.config.reduced_amount_factor).round() as u64;
            Ok(UnderwritingOutcome {
                credit_score,
                eligible_amount,
                emi_ratio_pct,
                decision: LoanDecision::Rejected,
                rejection_reasons,
                offers: Vec::new(),
                suggested_amount: Some(request.amount.min(reduced)),
                selected_plan: None,
            })
        }
    }

    /// Three offers priced around one base-rate draw. Displayed rates round
    /// to two decimals; EMIs are priced with the unrounded tier rate.
    fn synthesize_offers(
        &self,
        random: &mut dyn RandomSource,
        request: &LoanRequest,
    ) -> Result<Vec<LoanPlan>, EmiError> {
        let base_rate =
            random.next_in_range(self.config.base_rate_low_pct, self.config.base_rate_high_pct);
        let premium_tenure = request
            .tenure_months
            .saturating_sub(PREMIUM_TENURE_REDUCTION_MONTHS)
            .max(MIN_TENURE_MONTHS);

        let candidates = [
            (
                PlanTier::Economy,
                base_rate + ECONOMY_RATE_SPREAD_PCT,
                request.tenure_months + ECONOMY_TENURE_EXTENSION_MONTHS,
            ),
            (PlanTier::Standard, base_rate, request.tenure_months),
            (
                PlanTier::Premium,
                base_rate - PREMIUM_RATE_DISCOUNT_PCT,
                premium_tenure,
            ),
        ];

        candidates
            .iter()
            .map(|(tier, rate, tenure)| {
                let schedule = compute_emi(request.amount, *rate, *tenure)?;
                Ok(LoanPlan {
                    tier: *tier,
                    interest_rate_pct: round_rate(*rate),
                    tenure_months: *tenure,
                    emi: schedule.emi,
                    total_payable: schedule.total_payable,
                })
            })
            .collect()
    }
}

fn round_rate(rate_pct: f64) -> f64 {
    (rate_pct * 100.0).round() / 100.0
}
