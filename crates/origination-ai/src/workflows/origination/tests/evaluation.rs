use super::common::priced_request;
use crate::workflows::origination::domain::{LoanDecision, LoanTypeId, PlanTier};
use crate::workflows::origination::underwriting::random::stub::ScriptedRandomSource;
use crate::workflows::origination::underwriting::random::SeededRandomSource;
use crate::workflows::origination::underwriting::{
    RejectionReason, UnderwritingConfig, UnderwritingEngine,
};

fn engine() -> UnderwritingEngine {
    UnderwritingEngine::new(UnderwritingConfig::default())
}

#[test]
fn amount_above_the_income_ceiling_rejects_for_every_draw() {
    let request = priced_request(LoanTypeId::Personal, 2_000_000, 36, 20_000);
    let engine = engine();

    for seed in 0..32 {
        let outcome = engine
            .evaluate(&mut SeededRandomSource::from_seed(seed), &request, 20_000)
            .expect("evaluation succeeds");

        assert_eq!(outcome.decision, LoanDecision::Rejected, "seed {seed}");
        assert_eq!(outcome.eligible_amount, 960_000);
        assert!(outcome.offers.is_empty());
        assert!(outcome
            .rejection_reasons
            .iter()
            .any(|reason| matches!(reason, RejectionReason::AmountExceedsEligibleLimit { .. })));
        assert!(outcome
            .rejection_reasons
            .iter()
            .any(|reason| reason.summary().contains("eligible limit of 960000")));
    }
}

#[test]
fn affordable_request_is_approved_with_exactly_three_offers() {
    let request = priced_request(LoanTypeId::Personal, 500_000, 36, 50_000);
    let outcome = engine()
        .evaluate(&mut SeededRandomSource::from_seed(11), &request, 50_000)
        .expect("evaluation succeeds");

    assert_eq!(outcome.decision, LoanDecision::Approved);
    assert!(outcome.rejection_reasons.is_empty());
    assert!(outcome.suggested_amount.is_none());
    assert_eq!(outcome.offers.len(), 3);

    let standard = outcome.offer(PlanTier::Standard).expect("standard offer");
    let economy = outcome.offer(PlanTier::Economy).expect("economy offer");
    let premium = outcome.offer(PlanTier::Premium).expect("premium offer");

    assert_eq!(standard.tenure_months, 36);
    assert!((10.0..14.0).contains(&standard.interest_rate_pct));
    assert_eq!(economy.tenure_months, 48);
    assert!((economy.interest_rate_pct - standard.interest_rate_pct - 2.0).abs() < 0.011);
    assert_eq!(premium.tenure_months, 30);
    assert!((standard.interest_rate_pct - premium.interest_rate_pct - 1.5).abs() < 0.011);
    assert!(premium.emi > standard.emi, "shorter tenure raises the EMI");
    assert!(economy.total_payable > standard.total_payable);
}

#[test]
fn premium_tenure_never_drops_below_the_floor() {
    let request = priced_request(LoanTypeId::Personal, 500_000, 12, 50_000);
    let outcome = engine()
        .evaluate(&mut SeededRandomSource::from_seed(3), &request, 50_000)
        .expect("evaluation succeeds");

    let premium = outcome.offer(PlanTier::Premium).expect("premium offer");
    assert_eq!(premium.tenure_months, 12);
}

#[test]
fn rejection_reasons_arrive_in_the_fixed_adjudication_order() {
    // score draw at the bottom of the band, threshold raised above it
    let config = UnderwritingConfig {
        min_credit_score: 700,
        ..UnderwritingConfig::default()
    };
    let engine = UnderwritingEngine::new(config);

    let request = priced_request(LoanTypeId::Personal, 4_800_000, 36, 50_000);
    let mut random = ScriptedRandomSource::new(vec![0.0]);
    let outcome = engine
        .evaluate(&mut random, &request, 50_000)
        .expect("evaluation succeeds");

    assert_eq!(outcome.credit_score, 650);
    assert_eq!(outcome.rejection_reasons.len(), 3);
    assert!(matches!(
        outcome.rejection_reasons[0],
        RejectionReason::CreditScoreBelowThreshold {
            score: 650,
            minimum: 700
        }
    ));
    assert!(matches!(
        outcome.rejection_reasons[1],
        RejectionReason::AmountExceedsEligibleLimit { .. }
    ));
    assert!(matches!(
        outcome.rejection_reasons[2],
        RejectionReason::EmiRatioAboveLimit { .. }
    ));
}

#[test]
fn below_threshold_scores_cannot_occur_with_the_reference_draw() {
    // the reference mock draws from [650, 850) and rejects below 650
    let request = priced_request(LoanTypeId::Personal, 500_000, 36, 50_000);
    let engine = engine();

    for seed in 0..64 {
        let outcome = engine
            .evaluate(&mut SeededRandomSource::from_seed(seed), &request, 50_000)
            .expect("evaluation succeeds");
        assert!((650..850).contains(&outcome.credit_score));
        assert!(!outcome
            .rejection_reasons
            .iter()
            .any(|reason| matches!(reason, RejectionReason::CreditScoreBelowThreshold { .. })));
    }
}

#[test]
fn rejected_outcomes_suggest_a_reduced_amount() {
    let request = priced_request(LoanTypeId::Personal, 2_000_000, 36, 20_000);
    let outcome = engine()
        .evaluate(&mut SeededRandomSource::from_seed(5), &request, 20_000)
        .expect("evaluation succeeds");

    // min(requested, 80% of the 960k ceiling)
    assert_eq!(outcome.suggested_amount, Some(768_000));
}

#[test]
fn evaluation_is_deterministic_under_a_fixed_seed() {
    let request = priced_request(LoanTypeId::Personal, 500_000, 36, 50_000);
    let engine = engine();

    let first = engine
        .evaluate(&mut SeededRandomSource::from_seed(21), &request, 50_000)
        .expect("evaluation succeeds");
    let second = engine
        .evaluate(&mut SeededRandomSource::from_seed(21), &request, 50_000)
        .expect("evaluation succeeds");

    assert_eq!(first, second);
}

#[test]
fn affordability_uses_the_product_ratio_limit() {
    // business caps EMI at 45% of income; pick figures between 45% and 50%
    let request = priced_request(LoanTypeId::Business, 1_000_000, 36, 72_000);
    let outcome = engine()
        .evaluate(&mut SeededRandomSource::from_seed(2), &request, 72_000)
        .expect("evaluation succeeds");

    let ratio = request.emi as f64 / 72_000.0 * 100.0;
    assert!(ratio > 45.0 && ratio < 50.0, "ratio {ratio} out of band");
    assert_eq!(outcome.decision, LoanDecision::Rejected);
    assert!(outcome
        .rejection_reasons
        .iter()
        .any(|reason| matches!(
            reason,
            RejectionReason::EmiRatioAboveLimit { limit_pct, .. } if *limit_pct == 45.0
        )));
}
