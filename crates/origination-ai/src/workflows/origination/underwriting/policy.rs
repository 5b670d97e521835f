use serde::{Deserialize, Serialize};

use super::super::domain::LoanRequest;
use super::config::UnderwritingConfig;

/// Ordered rejection reasons surfaced with adverse decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    CreditScoreBelowThreshold {
        score: u16,
        minimum: u16,
    },
    AmountExceedsEligibleLimit {
        requested: u64,
        eligible: u64,
    },
    EmiRatioAboveLimit {
        ratio_pct: f64,
        limit_pct: f64,
    },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::CreditScoreBelowThreshold { score, minimum } => {
                format!("credit score {score} below minimum threshold ({minimum})")
            }
            RejectionReason::AmountExceedsEligibleLimit { eligible, .. } => {
                format!("requested amount exceeds eligible limit of {eligible}")
            }
            RejectionReason::EmiRatioAboveLimit {
                ratio_pct,
                limit_pct,
            } => {
                format!(
                    "EMI at {ratio_pct:.1}% of income exceeds the {limit_pct:.0}% affordability limit"
                )
            }
        }
    }
}

pub(crate) struct EligibilitySignals {
    pub credit_score: u16,
    pub eligible_amount: u64,
    pub emi_ratio_pct: f64,
}

/// Collect rejection reasons in the fixed adjudication order: credit score,
/// eligible ceiling, affordability.
pub(crate) fn collect_rejections(
    request: &LoanRequest,
    config: &UnderwritingConfig,
    signals: &EligibilitySignals,
) -> Vec<RejectionReason> {
    let mut reasons = Vec::new();

    if signals.credit_score < config.min_credit_score {
        reasons.push(RejectionReason::CreditScoreBelowThreshold {
            score: signals.credit_score,
            minimum: config.min_credit_score,
        });
    }

    if request.amount > signals.eligible_amount {
        reasons.push(RejectionReason::AmountExceedsEligibleLimit {
            requested: request.amount,
            eligible: signals.eligible_amount,
        });
    }

    let limit_pct = if request.max_emi_ratio_pct > 0.0 {
        request.max_emi_ratio_pct
    } else {
        config.default_max_emi_ratio_pct
    };
    if signals.emi_ratio_pct > limit_pct {
        reasons.push(RejectionReason::EmiRatioAboveLimit {
            ratio_pct: signals.emi_ratio_pct,
            limit_pct,
        });
    }

    reasons
}
