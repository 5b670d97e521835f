use chrono::NaiveDate;

use crate::workflows::origination::catalog::LoanTypeCatalog;
use crate::workflows::origination::domain::{LoanRequest, LoanTypeId, OriginationStage};
use crate::workflows::origination::emi::compute_emi;
use crate::workflows::origination::service::OriginationService;
use crate::workflows::origination::underwriting::random::SeededRandomSource;
use crate::workflows::origination::verification::IdentitySubmission;

pub(super) fn seeded_service(seed: u64) -> OriginationService<SeededRandomSource> {
    OriginationService::seeded(seed).expect("service builds from the standard catalog")
}

pub(super) fn identity() -> IdentitySubmission {
    IdentitySubmission {
        full_name: "Ananya Sharma".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1992, 4, 18).expect("valid date"),
        employer_name: "Acme Analytics".to_string(),
        pan: "ABCDE1234F".to_string(),
        aadhaar: "123456789012".to_string(),
    }
}

/// A request priced through the standard catalog, the way the service
/// derives one from applicant inputs.
pub(super) fn priced_request(
    loan_type: LoanTypeId,
    amount: u64,
    tenure_months: u32,
    monthly_income: u64,
) -> LoanRequest {
    let catalog = LoanTypeCatalog::standard();
    let config = catalog.get(loan_type).expect("standard entry present");
    let schedule =
        compute_emi(amount, config.annual_rate_pct, tenure_months).expect("valid request");

    LoanRequest {
        loan_type,
        amount,
        tenure_months,
        monthly_income,
        emi: schedule.emi,
        interest_rate_pct: config.annual_rate_pct,
        processing_fee_pct: config.processing_fee_pct,
        max_emi_ratio_pct: config.max_emi_ratio_pct,
    }
}

/// Drive a fresh application through verification so underwriting can run.
pub(super) fn complete_verification(service: &mut OriginationService<SeededRandomSource>) {
    service
        .advance_to(OriginationStage::Verification)
        .expect("sales intake is valid");
    service
        .record_identity(identity())
        .expect("identity is valid");
    service
        .attach_salary_slip("payslip.pdf")
        .expect("slip attaches during verification");
}
