//! Integration specifications for the loan origination wizard.
//!
//! Scenarios drive the public service facade and the HTTP router end to end
//! so quoting, underwriting, navigation, and sanction are validated without
//! reaching into private modules.

mod common {
    use chrono::NaiveDate;

    use origination_ai::workflows::origination::{
        IdentitySubmission, OriginationService, OriginationStage, SeededRandomSource,
    };

    pub(super) fn seeded_service(seed: u64) -> OriginationService<SeededRandomSource> {
        OriginationService::seeded(seed).expect("service builds from the standard catalog")
    }

    pub(super) fn identity() -> IdentitySubmission {
        IdentitySubmission {
            full_name: "Rohan Mehta".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 11, 2).expect("valid date"),
            employer_name: "Meridian Logistics".to_string(),
            pan: "FGHIJ5678K".to_string(),
            aadhaar: "987654321098".to_string(),
        }
    }

    pub(super) fn drive_to_underwriting(service: &mut OriginationService<SeededRandomSource>) {
        service
            .advance_to(OriginationStage::Verification)
            .expect("sales intake is valid");
        service
            .record_identity(identity())
            .expect("identity is valid");
        service
            .attach_salary_slip("salary-slip.pdf")
            .expect("slip attaches during verification");
        service
            .advance_to(OriginationStage::Underwriting)
            .expect("dossier complete");
    }
}

mod intake {
    use super::common::seeded_service;
    use origination_ai::workflows::origination::{
        compute_emi, LoanTypeId, OriginationError, OriginationStage, StageStatus,
    };

    #[test]
    fn reference_quote_matches_the_documented_scenario() {
        // 500000 @ 12% over 36 months
        let schedule = compute_emi(500_000, 12.0, 36).expect("valid inputs");
        assert_eq!(schedule.emi, 16_607);
        assert!((schedule.total_payable as i64 - 597_851).abs() <= 1);
        assert!((schedule.total_interest as i64 - 97_851).abs() <= 1);
    }

    #[test]
    fn the_wizard_opens_at_sales_with_a_live_quote() {
        let service = seeded_service(1);
        assert_eq!(service.current_stage(), Some(OriginationStage::Sales));
        assert_eq!(service.request().emi, service.schedule().emi);
        assert_eq!(service.history().len(), 4);
        assert_eq!(service.history()[0].status, StageStatus::Current);
    }

    #[test]
    fn production_wiring_builds_with_the_thread_rng() {
        let service = origination_ai::workflows::origination::OriginationService::standard()
            .expect("service builds");
        assert_eq!(service.current_stage(), Some(OriginationStage::Sales));
    }

    #[test]
    fn bounds_violations_surface_as_inline_errors() {
        let mut service = seeded_service(1);
        service
            .set_loan_type(LoanTypeId::Car)
            .expect("car offered");
        assert!(matches!(
            service.set_amount(5_000_000),
            Err(OriginationError::AmountOutOfBounds { max: 2_500_000, .. })
        ));
    }
}

mod underwriting_flow {
    use super::common::{drive_to_underwriting, seeded_service};
    use origination_ai::workflows::origination::{
        LoanDecision, OriginationStage, PlanTier, RejectionReason,
    };

    #[test]
    fn oversized_requests_reject_with_the_eligible_limit_reason() {
        let mut service = seeded_service(17);
        service.set_amount(4_800_000).expect("within bounds");
        drive_to_underwriting(&mut service);

        let outcome = service.underwriting();
        assert_eq!(outcome.decision, LoanDecision::Rejected);
        assert!(outcome.rejection_reasons.iter().any(|reason| matches!(
            reason,
            RejectionReason::AmountExceedsEligibleLimit { .. }
        )));
        assert!(outcome.offers.is_empty());
        assert!(outcome.suggested_amount.is_some());
    }

    #[test]
    fn approval_offers_three_plans_anchored_on_the_requested_tenure() {
        let mut service = seeded_service(17);
        drive_to_underwriting(&mut service);

        let outcome = service.underwriting().clone();
        assert_eq!(outcome.decision, LoanDecision::Approved);
        assert_eq!(outcome.offers.len(), 3);

        let standard = outcome.offer(PlanTier::Standard).expect("standard offer");
        assert_eq!(standard.tenure_months, service.request().tenure_months);
        assert!((10.0..14.0).contains(&standard.interest_rate_pct));
    }

    #[test]
    fn two_runs_with_the_same_seed_agree_end_to_end() {
        let mut first = seeded_service(23);
        let mut second = seeded_service(23);
        drive_to_underwriting(&mut first);
        drive_to_underwriting(&mut second);

        assert_eq!(first.underwriting(), second.underwriting());
        assert_eq!(
            first.verification().parsed_income,
            second.verification().parsed_income
        );
    }

    #[test]
    fn backward_navigation_restores_the_monotonic_history() {
        let mut service = seeded_service(17);
        drive_to_underwriting(&mut service);
        service
            .go_back_to(OriginationStage::Sales)
            .expect("backward move");

        let history = service.history();
        assert_eq!(history[0].stage, OriginationStage::Sales);
        for (index, entry) in history.iter().enumerate() {
            let expected = if index == 0 {
                origination_ai::workflows::origination::StageStatus::Current
            } else {
                origination_ai::workflows::origination::StageStatus::Pending
            };
            assert_eq!(entry.status, expected);
        }
        assert!(service.underwriting().is_pending());
    }
}

mod sanction_flow {
    use super::common::{drive_to_underwriting, seeded_service};
    use chrono::Utc;
    use origination_ai::workflows::origination::{
        OriginationStage, PlanTier, StageStatus, VerificationDossier,
    };

    #[test]
    fn confirmed_sanction_produces_the_flattened_snapshot() {
        let mut service = seeded_service(29);
        drive_to_underwriting(&mut service);
        let plan = service
            .select_plan(PlanTier::Standard)
            .expect("approved with offers");
        service
            .advance_to(OriginationStage::Sanction)
            .expect("plan selected");

        let approved_on = Utc::now();
        let letter = service
            .confirm_sanction(approved_on)
            .expect("sanction confirmed");

        assert_eq!(letter.customer_name, "Rohan Mehta");
        assert_eq!(letter.sanctioned_amount, service.request().amount);
        assert_eq!(letter.interest_rate_pct, plan.interest_rate_pct);
        assert_eq!(letter.emi, plan.emi);
        assert_eq!(letter.approved_on, approved_on);
        assert!(letter.render_text().contains("LOAN SANCTION LETTER"));

        assert!(service
            .history()
            .iter()
            .all(|entry| entry.status == StageStatus::Completed));
    }

    #[test]
    fn reset_after_any_navigation_restores_the_initial_state() {
        let mut service = seeded_service(29);
        drive_to_underwriting(&mut service);
        service
            .go_back_to(OriginationStage::Verification)
            .expect("backward move");
        service
            .advance_to(OriginationStage::Underwriting)
            .expect("re-entry");

        service.reset().expect("reset rebuilds defaults");

        assert_eq!(service.current_stage(), Some(OriginationStage::Sales));
        assert_eq!(service.request().amount, 500_000);
        assert_eq!(service.request().tenure_months, 36);
        assert!(service.underwriting().is_pending());
        assert_eq!(*service.verification(), VerificationDossier::default());
    }
}

mod routing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use origination_ai::workflows::origination::{
        origination_router, LoanTypeCatalog, UnderwritingConfig,
    };

    fn build_router() -> axum::Router {
        origination_router(
            Arc::new(LoanTypeCatalog::standard()),
            UnderwritingConfig::default(),
            None,
        )
    }

    async fn dispatch(router: axum::Router, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
        let request = match payload {
            Some(payload) => Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&payload).expect("serialize payload"),
                ))
                .expect("request"),
            None => Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        };

        let response = router.oneshot(request).await.expect("router dispatch");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        (status, value)
    }

    #[tokio::test]
    async fn loan_types_lists_the_standard_catalog() {
        let (status, body) = dispatch(build_router(), "/api/v1/origination/loan-types", None).await;
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().expect("array body");
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].get("id"), Some(&json!("personal")));
    }

    #[tokio::test]
    async fn quote_returns_the_reference_schedule() {
        let payload = json!({
            "loan_type": "personal",
            "amount": 500_000,
            "tenure_months": 36,
            "monthly_income": 50_000,
        });
        let (status, body) = dispatch(
            build_router(),
            "/api/v1/origination/quote",
            Some(payload),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.pointer("/schedule/emi").and_then(Value::as_u64),
            Some(16_607)
        );
        assert_eq!(body.get("processing_fee").and_then(Value::as_u64), Some(5_000));
        let ratio = body
            .get("emi_to_income_pct")
            .and_then(Value::as_f64)
            .expect("ratio present");
        assert!((ratio - 33.214).abs() < 0.01);
    }

    #[tokio::test]
    async fn quote_rejects_out_of_bounds_requests() {
        let payload = json!({
            "loan_type": "personal",
            "amount": 10_000,
            "tenure_months": 36,
        });
        let (status, body) = dispatch(
            build_router(),
            "/api/v1/origination/quote",
            Some(payload),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("outside"));
    }

    #[tokio::test]
    async fn evaluate_reports_rejection_as_an_outcome_not_an_error() {
        // 2,000,000 against a 20,000 income: over the 48x ceiling of 960,000
        let payload = json!({
            "loan_type": "personal",
            "amount": 2_000_000,
            "tenure_months": 36,
            "monthly_income": 20_000,
            "seed": 7,
        });
        let (status, body) = dispatch(
            build_router(),
            "/api/v1/origination/evaluate",
            Some(payload),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.pointer("/outcome/decision").and_then(Value::as_str),
            Some("rejected")
        );
        assert_eq!(
            body.pointer("/outcome/eligible_amount").and_then(Value::as_u64),
            Some(960_000)
        );
        let reasons = body
            .pointer("/outcome/rejection_reasons")
            .and_then(Value::as_array)
            .expect("reasons present");
        assert!(!reasons.is_empty());
    }

    #[tokio::test]
    async fn evaluate_is_reproducible_under_a_seed() {
        let payload = json!({
            "loan_type": "personal",
            "amount": 500_000,
            "tenure_months": 36,
            "monthly_income": 50_000,
            "seed": 99,
        });

        let (_, first) = dispatch(
            build_router(),
            "/api/v1/origination/evaluate",
            Some(payload.clone()),
        )
        .await;
        let (_, second) = dispatch(
            build_router(),
            "/api/v1/origination/evaluate",
            Some(payload),
        )
        .await;

        assert_eq!(first, second);
        assert_eq!(
            first.pointer("/outcome/decision").and_then(Value::as_str),
            Some("approved")
        );
        assert_eq!(
            first
                .pointer("/outcome/offers")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(3)
        );
    }

    #[tokio::test]
    async fn evaluate_enforces_the_income_floor() {
        let payload = json!({
            "loan_type": "personal",
            "amount": 500_000,
            "tenure_months": 36,
            "monthly_income": 5_000,
        });
        let (status, body) = dispatch(
            build_router(),
            "/api/v1/origination/evaluate",
            Some(payload),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("qualifying floor"));
    }
}
