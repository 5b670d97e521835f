use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use origination_ai::workflows::origination::{LoanTypeId, PlanTier};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_loan_type(raw: &str) -> Result<LoanTypeId, String> {
    LoanTypeId::from_str(raw)
}

pub(crate) fn parse_plan_tier(raw: &str) -> Result<PlanTier, String> {
    PlanTier::from_str(raw)
}
