use crate::infra::{parse_loan_type, parse_plan_tier};
use chrono::{NaiveDate, Utc};
use clap::Args;
use origination_ai::error::AppError;
use origination_ai::workflows::origination::{
    compute_emi, IdentitySubmission, LoanDecision, LoanTypeCatalog, LoanTypeId, OriginationError,
    OriginationService, OriginationStage, PlanTier, StageHistoryEntry,
};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Loan product (personal, home, car, education, business)
    #[arg(long, default_value = "personal", value_parser = parse_loan_type)]
    pub(crate) loan_type: LoanTypeId,
    /// Principal in whole currency units
    #[arg(long, default_value_t = 500_000)]
    pub(crate) amount: u64,
    /// Tenure in months
    #[arg(long, default_value_t = 36)]
    pub(crate) tenure_months: u32,
    /// Monthly income, enables the affordability readout
    #[arg(long)]
    pub(crate) monthly_income: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed for the mocked draws so the walkthrough is reproducible
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
    /// Loan product (personal, home, car, education, business)
    #[arg(long, default_value = "personal", value_parser = parse_loan_type)]
    pub(crate) loan_type: LoanTypeId,
    /// Principal in whole currency units
    #[arg(long, default_value_t = 500_000)]
    pub(crate) amount: u64,
    /// Tenure in months
    #[arg(long, default_value_t = 36)]
    pub(crate) tenure_months: u32,
    /// Declared monthly income
    #[arg(long, default_value_t = 50_000)]
    pub(crate) monthly_income: u64,
    /// Plan tier to accept when the application is approved
    #[arg(long, default_value = "standard", value_parser = parse_plan_tier)]
    pub(crate) plan: PlanTier,
    /// Applicant name printed on the sanction letter
    #[arg(long, default_value = "Ananya Sharma")]
    pub(crate) customer_name: String,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let catalog = LoanTypeCatalog::standard();
    let config = catalog
        .get(args.loan_type)
        .map_err(OriginationError::from)?;

    if !config.amount_in_range(args.amount) {
        return Err(AppError::Workflow(OriginationError::AmountOutOfBounds {
            value: args.amount,
            min: config.min_amount,
            max: config.max_amount,
        }));
    }
    if !config.tenure_in_range(args.tenure_months) {
        return Err(AppError::Workflow(OriginationError::TenureOutOfBounds {
            value: args.tenure_months,
            min: origination_ai::workflows::origination::MIN_TENURE_MONTHS,
            max: config.max_tenure_months,
        }));
    }

    let schedule = compute_emi(args.amount, config.annual_rate_pct, args.tenure_months)
        .map_err(OriginationError::from)?;

    println!("{} quote", config.display_name);
    println!(
        "Principal {} | {} months @ {}% p.a.",
        args.amount, args.tenure_months, config.annual_rate_pct
    );
    println!("Monthly EMI: {}", schedule.emi);
    println!(
        "Total payable: {} (interest {}, {}%/{}% split)",
        schedule.total_payable,
        schedule.total_interest,
        schedule.principal_share_pct,
        schedule.interest_share_pct
    );
    println!(
        "Processing fee: {}",
        config.processing_fee_for(args.amount)
    );

    if let Some(income) = args.monthly_income.filter(|income| *income > 0) {
        let ratio = schedule.emi as f64 / income as f64 * 100.0;
        let within = ratio <= config.max_emi_ratio_pct;
        println!(
            "EMI to income: {:.1}% ({} the {:.0}% limit)",
            ratio,
            if within { "within" } else { "over" },
            config.max_emi_ratio_pct
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        loan_type,
        amount,
        tenure_months,
        monthly_income,
        plan,
        customer_name,
    } = args;

    println!("Loan origination wizard demo (seed {seed})");

    let mut service = OriginationService::seeded(seed).map_err(AppError::Workflow)?;
    service.set_loan_type(loan_type).map_err(AppError::Workflow)?;
    service.set_amount(amount).map_err(AppError::Workflow)?;
    service
        .set_tenure(tenure_months)
        .map_err(AppError::Workflow)?;
    service
        .set_income(monthly_income)
        .map_err(AppError::Workflow)?;

    let request = service.request();
    let schedule = service.schedule();
    println!("\nSales intake");
    println!(
        "- {} of {} over {} months @ {}% p.a.",
        loan_type.label(),
        request.amount,
        request.tenure_months,
        request.interest_rate_pct
    );
    println!(
        "- EMI {} | total payable {} | declared income {}",
        schedule.emi, schedule.total_payable, monthly_income
    );

    service
        .advance_to(OriginationStage::Verification)
        .map_err(AppError::Workflow)?;
    service
        .record_identity(demo_identity(&customer_name))
        .map_err(AppError::Workflow)?;
    service
        .attach_salary_slip("salary-slip.pdf")
        .map_err(AppError::Workflow)?;

    let dossier = service.verification();
    println!("\nVerification");
    println!("- Identity recorded for {}", dossier.full_name);
    if let (Some(income), Some(employer)) = (dossier.parsed_income, &dossier.parsed_employer) {
        println!("- Salary slip parsed: {income}/month at {employer}");
    }

    service
        .advance_to(OriginationStage::Underwriting)
        .map_err(AppError::Workflow)?;

    let outcome = service.underwriting().clone();
    println!("\nUnderwriting");
    println!(
        "- Credit score {} | eligible up to {} | EMI ratio {:.1}%",
        outcome.credit_score, outcome.eligible_amount, outcome.emi_ratio_pct
    );
    println!("- Decision: {}", outcome.decision.label());

    if outcome.decision == LoanDecision::Rejected {
        println!("  Reasons:");
        for reason in &outcome.rejection_reasons {
            println!("  - {}", reason.summary());
        }
        if let Some(suggested) = outcome.suggested_amount {
            println!("  Suggested reduced amount: {suggested}");
        }
        println!("  Adjust the application and run the demo again.");
        render_history(service.history());
        return Ok(());
    }

    println!("  Offers:");
    for offer in &outcome.offers {
        println!(
            "  - {}: {}% p.a. over {} months, EMI {} (total {})",
            offer.tier.label(),
            offer.interest_rate_pct,
            offer.tenure_months,
            offer.emi,
            offer.total_payable
        );
    }

    let accepted = service.select_plan(plan).map_err(AppError::Workflow)?;
    println!(
        "- Accepted {} @ {}% p.a.",
        accepted.tier.label(),
        accepted.interest_rate_pct
    );

    service
        .advance_to(OriginationStage::Sanction)
        .map_err(AppError::Workflow)?;
    let letter = service
        .confirm_sanction(Utc::now())
        .map_err(AppError::Workflow)?;

    println!("\nSanction");
    println!("{}", letter.render_text());

    render_history(service.history());
    Ok(())
}

fn demo_identity(customer_name: &str) -> IdentitySubmission {
    IdentitySubmission {
        full_name: customer_name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1991, 6, 24).unwrap_or_default(),
        employer_name: "Self-declared".to_string(),
        pan: "ABCDE1234F".to_string(),
        aadhaar: "123456789012".to_string(),
    }
}

fn render_history(entries: &[StageHistoryEntry]) {
    println!("Stage history");
    for entry in entries {
        let decision_note = match &entry.decision {
            Some(decision) => format!(" -> {decision}"),
            None => String::new(),
        };
        println!(
            "- {} | {} | {}{}",
            entry.stage.label(),
            entry.status.label(),
            entry.summary,
            decision_note
        );
    }
}
