//! HTTP surface for the origination core: product listing, EMI quoting,
//! and one-shot (optionally seeded) eligibility evaluation.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::{LoanTypeCatalog, MIN_TENURE_MONTHS};
use super::domain::{LoanRequest, LoanTypeId};
use super::emi::{compute_emi, EmiSchedule};
use super::service::OriginationError;
use super::underwriting::random::{SeededRandomSource, ThreadRandomSource};
use super::underwriting::{UnderwritingConfig, UnderwritingEngine, UnderwritingOutcome};

#[derive(Clone)]
struct RouterState {
    catalog: Arc<LoanTypeCatalog>,
    config: UnderwritingConfig,
    default_seed: Option<u64>,
}

/// Router builder exposing the origination endpoints. A default seed makes
/// every evaluation reproducible unless the request carries its own.
pub fn origination_router(
    catalog: Arc<LoanTypeCatalog>,
    config: UnderwritingConfig,
    default_seed: Option<u64>,
) -> Router {
    let state = RouterState {
        catalog,
        config,
        default_seed,
    };
    Router::new()
        .route("/api/v1/origination/loan-types", get(loan_types_handler))
        .route("/api/v1/origination/quote", post(quote_handler))
        .route("/api/v1/origination/evaluate", post(evaluate_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequest {
    pub(crate) loan_type: LoanTypeId,
    pub(crate) amount: u64,
    pub(crate) tenure_months: u32,
    #[serde(default)]
    pub(crate) monthly_income: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuoteResponse {
    pub(crate) loan_type: LoanTypeId,
    pub(crate) amount: u64,
    pub(crate) tenure_months: u32,
    pub(crate) interest_rate_pct: f64,
    pub(crate) processing_fee: u64,
    pub(crate) schedule: EmiSchedule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) emi_to_income_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) loan_type: LoanTypeId,
    pub(crate) amount: u64,
    pub(crate) tenure_months: u32,
    pub(crate) monthly_income: u64,
    /// Seeds the credit-score and base-rate draws for reproducible runs.
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateResponse {
    pub(crate) request: LoanRequest,
    pub(crate) outcome: UnderwritingOutcome,
}

async fn loan_types_handler(State(state): State<RouterState>) -> Response {
    (StatusCode::OK, Json(state.catalog.entries().to_vec())).into_response()
}

async fn quote_handler(
    State(state): State<RouterState>,
    Json(payload): Json<QuoteRequest>,
) -> Response {
    let QuoteRequest {
        loan_type,
        amount,
        tenure_months,
        monthly_income,
    } = payload;

    let request = match validated_request(&state, loan_type, amount, tenure_months, monthly_income)
    {
        Ok(request) => request,
        Err(error) => return unprocessable(&error),
    };

    let schedule = match compute_emi(request.amount, request.interest_rate_pct, request.tenure_months)
    {
        Ok(schedule) => schedule,
        Err(error) => return unprocessable(&OriginationError::Emi(error)),
    };

    let emi_to_income_pct = monthly_income
        .filter(|income| *income > 0)
        .map(|income| schedule.emi as f64 / income as f64 * 100.0);

    let processing_fee = (request.amount as f64 * request.processing_fee_pct / 100.0).round() as u64;

    (
        StatusCode::OK,
        Json(QuoteResponse {
            loan_type,
            amount: request.amount,
            tenure_months: request.tenure_months,
            interest_rate_pct: request.interest_rate_pct,
            processing_fee,
            schedule,
            emi_to_income_pct,
        }),
    )
        .into_response()
}

async fn evaluate_handler(
    State(state): State<RouterState>,
    Json(payload): Json<EvaluateRequest>,
) -> Response {
    let EvaluateRequest {
        loan_type,
        amount,
        tenure_months,
        monthly_income,
        seed,
    } = payload;

    let mut request =
        match validated_request(&state, loan_type, amount, tenure_months, Some(monthly_income)) {
            Ok(request) => request,
            Err(error) => return unprocessable(&error),
        };

    if monthly_income < state.config.min_monthly_income {
        return unprocessable(&OriginationError::IncomeBelowFloor {
            income: monthly_income,
            floor: state.config.min_monthly_income,
        });
    }

    let schedule = match compute_emi(request.amount, request.interest_rate_pct, request.tenure_months)
    {
        Ok(schedule) => schedule,
        Err(error) => return unprocessable(&OriginationError::Emi(error)),
    };
    request.emi = schedule.emi;

    let engine = UnderwritingEngine::new(state.config.clone());
    let evaluated = match seed.or(state.default_seed) {
        Some(seed) => engine.evaluate(
            &mut SeededRandomSource::from_seed(seed),
            &request,
            monthly_income,
        ),
        None => engine.evaluate(&mut ThreadRandomSource, &request, monthly_income),
    };

    match evaluated {
        Ok(outcome) => (StatusCode::OK, Json(EvaluateResponse { request, outcome })).into_response(),
        Err(error) => unprocessable(&OriginationError::Emi(error)),
    }
}

fn validated_request(
    state: &RouterState,
    loan_type: LoanTypeId,
    amount: u64,
    tenure_months: u32,
    monthly_income: Option<u64>,
) -> Result<LoanRequest, OriginationError> {
    let config = state.catalog.get(loan_type)?;
    if !config.amount_in_range(amount) {
        return Err(OriginationError::AmountOutOfBounds {
            value: amount,
            min: config.min_amount,
            max: config.max_amount,
        });
    }
    if !config.tenure_in_range(tenure_months) {
        return Err(OriginationError::TenureOutOfBounds {
            value: tenure_months,
            min: MIN_TENURE_MONTHS,
            max: config.max_tenure_months,
        });
    }

    Ok(LoanRequest {
        loan_type,
        amount,
        tenure_months,
        monthly_income: monthly_income.unwrap_or(0),
        emi: 0,
        interest_rate_pct: config.annual_rate_pct,
        processing_fee_pct: config.processing_fee_pct,
        max_emi_ratio_pct: config.max_emi_ratio_pct,
    })
}

fn unprocessable(error: &OriginationError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}
