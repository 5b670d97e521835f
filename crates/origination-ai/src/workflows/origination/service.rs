//! Orchestrating service owning the application aggregate: loan request,
//! verification dossier, underwriting outcome, and stage ledger. The UI
//! boundary dispatches commands and renders the read-only projections.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::{CatalogError, LoanTypeCatalog, MIN_TENURE_MONTHS};
use super::domain::{LoanDecision, LoanPlan, LoanRequest, LoanTypeId, OriginationStage, PlanTier};
use super::emi::{compute_emi, EmiError, EmiSchedule};
use super::process::{StageHistoryEntry, StageLedger, TransitionError};
use super::sanction::SanctionLetter;
use super::underwriting::random::{RandomSource, SeededRandomSource, ThreadRandomSource};
use super::underwriting::{UnderwritingConfig, UnderwritingEngine, UnderwritingOutcome};
use super::verification::{IdentitySubmission, VerificationDossier, VerificationError};

const DEFAULT_LOAN_TYPE: LoanTypeId = LoanTypeId::Personal;
const DEFAULT_AMOUNT: u64 = 500_000;
const DEFAULT_TENURE_MONTHS: u32 = 36;
const DEFAULT_MONTHLY_INCOME: u64 = 50_000;

/// Command failures raised by the origination service. A rejected
/// application is a normal [`UnderwritingOutcome`], never one of these.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum OriginationError {
    #[error(transparent)]
    Emi(#[from] EmiError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error("amount {value} is outside {min}..={max} for the selected loan type")]
    AmountOutOfBounds { value: u64, min: u64, max: u64 },
    #[error("tenure of {value} months is outside {min}..={max} for the selected loan type")]
    TenureOutOfBounds { value: u32, min: u32, max: u32 },
    #[error("monthly income must be positive")]
    NonPositiveIncome,
    #[error("monthly income {income} is below the qualifying floor of {floor}")]
    IncomeBelowFloor { income: u64, floor: u64 },
    #[error("{command} is only available during the {expected:?} stage")]
    WrongStage {
        command: &'static str,
        expected: OriginationStage,
    },
    #[error("identity and salary slip must be verified before underwriting")]
    VerificationIncomplete,
    #[error("the application is not approved")]
    NotApproved,
    #[error("no {0:?} offer is available")]
    OfferUnavailable(PlanTier),
    #[error("a repayment plan must be selected before sanction")]
    PlanNotSelected,
}

/// Sanitized snapshot of the externally visible application status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub current_stage: Option<OriginationStage>,
    pub loan_type: LoanTypeId,
    pub amount: u64,
    pub tenure_months: u32,
    pub emi: u64,
    pub decision: LoanDecision,
    pub decision_rationale: String,
    pub history: Vec<StageHistoryEntry>,
}

/// Wizard orchestrator. Owns every piece of mutable application state and
/// recomputes the derived EMI explicitly whenever an input changes.
pub struct OriginationService<R: RandomSource> {
    catalog: LoanTypeCatalog,
    engine: UnderwritingEngine,
    random: R,
    request: LoanRequest,
    schedule: EmiSchedule,
    verification: VerificationDossier,
    underwriting: UnderwritingOutcome,
    ledger: StageLedger,
}

impl OriginationService<ThreadRandomSource> {
    /// Production wiring: standard catalog, reference policy, thread RNG.
    pub fn standard() -> Result<Self, OriginationError> {
        Self::new(
            LoanTypeCatalog::standard(),
            UnderwritingConfig::default(),
            ThreadRandomSource,
        )
    }
}

impl OriginationService<SeededRandomSource> {
    /// Deterministic wiring for tests and reproducible demos.
    pub fn seeded(seed: u64) -> Result<Self, OriginationError> {
        Self::new(
            LoanTypeCatalog::standard(),
            UnderwritingConfig::default(),
            SeededRandomSource::from_seed(seed),
        )
    }
}

impl<R: RandomSource> OriginationService<R> {
    pub fn new(
        catalog: LoanTypeCatalog,
        config: UnderwritingConfig,
        random: R,
    ) -> Result<Self, OriginationError> {
        let (request, schedule) = initial_request(&catalog)?;
        Ok(Self {
            catalog,
            engine: UnderwritingEngine::new(config),
            random,
            request,
            schedule,
            verification: VerificationDossier::default(),
            underwriting: UnderwritingOutcome::pending(),
            ledger: StageLedger::new(),
        })
    }

    // ── Read-only projections ────────────────────────────────────────────

    pub fn request(&self) -> &LoanRequest {
        &self.request
    }

    pub fn schedule(&self) -> &EmiSchedule {
        &self.schedule
    }

    pub fn verification(&self) -> &VerificationDossier {
        &self.verification
    }

    pub fn underwriting(&self) -> &UnderwritingOutcome {
        &self.underwriting
    }

    pub fn history(&self) -> &[StageHistoryEntry] {
        self.ledger.entries()
    }

    pub fn current_stage(&self) -> Option<OriginationStage> {
        self.ledger.current_stage()
    }

    pub fn catalog(&self) -> &LoanTypeCatalog {
        &self.catalog
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            current_stage: self.current_stage(),
            loan_type: self.request.loan_type,
            amount: self.request.amount,
            tenure_months: self.request.tenure_months,
            emi: self.request.emi,
            decision: self.underwriting.decision,
            decision_rationale: self.underwriting.decision_rationale(),
            history: self.ledger.entries().to_vec(),
        }
    }

    // ── Sales-intake commands ────────────────────────────────────────────

    /// Switch products: clamp the ask into the new bounds and adopt the new
    /// rate, fee, and affordability ratio in one step.
    pub fn set_loan_type(&mut self, id: LoanTypeId) -> Result<&LoanRequest, OriginationError> {
        self.require_stage("set_loan_type", OriginationStage::Sales)?;
        let config = self.catalog.get(id)?;

        let amount = config.clamp_amount(self.request.amount);
        let tenure_months = config.clamp_tenure(self.request.tenure_months);
        let schedule = compute_emi(amount, config.annual_rate_pct, tenure_months)?;

        self.request.loan_type = id;
        self.request.amount = amount;
        self.request.tenure_months = tenure_months;
        self.request.interest_rate_pct = config.annual_rate_pct;
        self.request.processing_fee_pct = config.processing_fee_pct;
        self.request.max_emi_ratio_pct = config.max_emi_ratio_pct;
        self.request.emi = schedule.emi;
        self.schedule = schedule;
        Ok(&self.request)
    }

    /// Direct edits outside the product bounds are rejected, not clamped.
    pub fn set_amount(&mut self, amount: u64) -> Result<&LoanRequest, OriginationError> {
        self.require_stage("set_amount", OriginationStage::Sales)?;
        let config = self.catalog.get(self.request.loan_type)?;
        if !config.amount_in_range(amount) {
            return Err(OriginationError::AmountOutOfBounds {
                value: amount,
                min: config.min_amount,
                max: config.max_amount,
            });
        }

        self.request.amount = amount;
        self.recompute()?;
        Ok(&self.request)
    }

    pub fn set_tenure(&mut self, tenure_months: u32) -> Result<&LoanRequest, OriginationError> {
        self.require_stage("set_tenure", OriginationStage::Sales)?;
        let config = self.catalog.get(self.request.loan_type)?;
        if !config.tenure_in_range(tenure_months) {
            return Err(OriginationError::TenureOutOfBounds {
                value: tenure_months,
                min: MIN_TENURE_MONTHS,
                max: config.max_tenure_months,
            });
        }

        self.request.tenure_months = tenure_months;
        self.recompute()?;
        Ok(&self.request)
    }

    pub fn set_income(&mut self, monthly_income: u64) -> Result<&LoanRequest, OriginationError> {
        self.require_stage("set_income", OriginationStage::Sales)?;
        if monthly_income == 0 {
            return Err(OriginationError::NonPositiveIncome);
        }

        self.request.monthly_income = monthly_income;
        Ok(&self.request)
    }

    // ── Verification commands ────────────────────────────────────────────

    pub fn record_identity(
        &mut self,
        submission: IdentitySubmission,
    ) -> Result<&VerificationDossier, OriginationError> {
        self.require_stage("record_identity", OriginationStage::Verification)?;
        self.verification.record_identity(submission)?;
        Ok(&self.verification)
    }

    pub fn attach_salary_slip(
        &mut self,
        file_name: &str,
    ) -> Result<&VerificationDossier, OriginationError> {
        self.require_stage("attach_salary_slip", OriginationStage::Verification)?;
        self.verification
            .attach_salary_slip(file_name, self.request.monthly_income, &mut self.random);
        Ok(&self.verification)
    }

    // ── Stage transitions ────────────────────────────────────────────────

    pub fn advance_to(&mut self, target: OriginationStage) -> Result<(), OriginationError> {
        let current = self
            .ledger
            .current_stage()
            .ok_or(TransitionError::AlreadyComplete)?;
        if target.index() <= current.index() {
            return Err(TransitionError::NotForward {
                from: current,
                to: target,
            }
            .into());
        }

        if target.index() > OriginationStage::Sales.index() {
            self.check_sales_exit()?;
        }
        if target.index() > OriginationStage::Verification.index()
            && !self.verification.is_complete()
        {
            return Err(OriginationError::VerificationIncomplete);
        }
        if target.index() > OriginationStage::Underwriting.index() {
            if !self.underwriting.is_approved() {
                return Err(OriginationError::NotApproved);
            }
            if self.underwriting.selected_plan.is_none() {
                return Err(OriginationError::PlanNotSelected);
            }
        }

        self.ledger.advance_to(target)?;
        self.annotate_completed_through(target);
        self.enter_underwriting_if_pending()
    }

    /// Move backward. The assessment belongs to a single forward pass, so
    /// landing on underwriting or anywhere before it discards the outcome;
    /// re-entering underwriting re-runs the policy.
    pub fn go_back_to(&mut self, target: OriginationStage) -> Result<(), OriginationError> {
        self.ledger.go_back_to(target)?;
        if target.index() <= OriginationStage::Underwriting.index() {
            self.underwriting = UnderwritingOutcome::pending();
        }
        self.enter_underwriting_if_pending()
    }

    pub fn select_plan(&mut self, tier: PlanTier) -> Result<LoanPlan, OriginationError> {
        self.require_stage("select_plan", OriginationStage::Underwriting)?;
        if !self.underwriting.is_approved() {
            return Err(OriginationError::NotApproved);
        }
        let plan = self
            .underwriting
            .offer(tier)
            .cloned()
            .ok_or(OriginationError::OfferUnavailable(tier))?;

        self.underwriting.selected_plan = Some(plan.clone());
        Ok(plan)
    }

    /// Explicit terminal confirmation: completes the sanction stage and
    /// produces the flattened letter snapshot.
    pub fn confirm_sanction(
        &mut self,
        approved_on: DateTime<Utc>,
    ) -> Result<SanctionLetter, OriginationError> {
        self.require_stage("confirm_sanction", OriginationStage::Sanction)?;
        let plan = self
            .underwriting
            .selected_plan
            .clone()
            .ok_or(OriginationError::PlanNotSelected)?;
        let config = self.catalog.get(self.request.loan_type)?;
        let processing_fee = config.processing_fee_for(self.request.amount);

        self.ledger.complete_terminal()?;
        self.ledger.annotate(
            OriginationStage::Sanction,
            "Sanction letter generated",
            Some("Loan documentation complete".to_string()),
        );

        Ok(SanctionLetter::new(
            self.verification.full_name.clone(),
            self.request.loan_type,
            self.request.amount,
            &plan,
            processing_fee,
            approved_on,
        ))
    }

    /// Full application discard: defaults, empty dossier, pending outcome,
    /// fresh ledger.
    pub fn reset(&mut self) -> Result<(), OriginationError> {
        let (request, schedule) = initial_request(&self.catalog)?;
        self.request = request;
        self.schedule = schedule;
        self.verification = VerificationDossier::default();
        self.underwriting = UnderwritingOutcome::pending();
        self.ledger.reset();
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn require_stage(
        &self,
        command: &'static str,
        expected: OriginationStage,
    ) -> Result<(), OriginationError> {
        if self.ledger.current_stage() == Some(expected) {
            Ok(())
        } else {
            Err(OriginationError::WrongStage { command, expected })
        }
    }

    fn recompute(&mut self) -> Result<(), OriginationError> {
        let schedule = compute_emi(
            self.request.amount,
            self.request.interest_rate_pct,
            self.request.tenure_months,
        )?;
        self.request.emi = schedule.emi;
        self.schedule = schedule;
        Ok(())
    }

    fn check_sales_exit(&self) -> Result<(), OriginationError> {
        let config = self.catalog.get(self.request.loan_type)?;
        if !config.amount_in_range(self.request.amount) {
            return Err(OriginationError::AmountOutOfBounds {
                value: self.request.amount,
                min: config.min_amount,
                max: config.max_amount,
            });
        }
        if !config.tenure_in_range(self.request.tenure_months) {
            return Err(OriginationError::TenureOutOfBounds {
                value: self.request.tenure_months,
                min: MIN_TENURE_MONTHS,
                max: config.max_tenure_months,
            });
        }

        if self.request.monthly_income == 0 {
            return Err(OriginationError::NonPositiveIncome);
        }
        let floor = config
            .min_monthly_income
            .max(self.engine.config().min_monthly_income);
        if self.request.monthly_income < floor {
            return Err(OriginationError::IncomeBelowFloor {
                income: self.request.monthly_income,
                floor,
            });
        }
        Ok(())
    }

    fn annotate_completed_through(&mut self, target: OriginationStage) {
        for stage in OriginationStage::ordered() {
            if stage.index() >= target.index() {
                break;
            }
            let (summary, decision) = match stage {
                OriginationStage::Sales => (
                    "Loan requirements collected",
                    Some(format!(
                        "{} @ {}% for {} months",
                        self.request.amount,
                        self.request.interest_rate_pct,
                        self.request.tenure_months
                    )),
                ),
                OriginationStage::Verification => (
                    "KYC verification completed",
                    Some(format!("Verified: {}", self.verification.full_name)),
                ),
                OriginationStage::Underwriting => (
                    "Credit assessment completed",
                    self.underwriting.selected_plan.as_ref().map(|plan| {
                        format!(
                            "Approved: {} @ {}%",
                            plan.tier.label(),
                            plan.interest_rate_pct
                        )
                    }),
                ),
                // the terminal stage only completes through confirm_sanction
                OriginationStage::Sanction => continue,
            };
            self.ledger.annotate(stage, summary, decision);
        }
    }

    /// Runs the policy exactly once per underwriting entry; repeated reads
    /// never re-evaluate, and only a backward move re-arms it.
    fn enter_underwriting_if_pending(&mut self) -> Result<(), OriginationError> {
        if self.ledger.current_stage() == Some(OriginationStage::Underwriting)
            && self.underwriting.is_pending()
        {
            let income = self
                .verification
                .verified_income(self.request.monthly_income);
            self.underwriting = self
                .engine
                .evaluate(&mut self.random, &self.request, income)?;
        }
        Ok(())
    }
}

fn initial_request(
    catalog: &LoanTypeCatalog,
) -> Result<(LoanRequest, EmiSchedule), OriginationError> {
    let config = match catalog.get(DEFAULT_LOAN_TYPE) {
        Ok(config) => config,
        Err(_) => catalog
            .entries()
            .first()
            .ok_or(CatalogError::UnknownLoanType(DEFAULT_LOAN_TYPE))?,
    };

    let amount = config.clamp_amount(DEFAULT_AMOUNT);
    let tenure_months = config.clamp_tenure(DEFAULT_TENURE_MONTHS);
    let schedule = compute_emi(amount, config.annual_rate_pct, tenure_months)?;
    let request = LoanRequest {
        loan_type: config.id,
        amount,
        tenure_months,
        monthly_income: DEFAULT_MONTHLY_INCOME,
        emi: schedule.emi,
        interest_rate_pct: config.annual_rate_pct,
        processing_fee_pct: config.processing_fee_pct,
        max_emi_ratio_pct: config.max_emi_ratio_pct,
    };
    Ok((request, schedule))
}
