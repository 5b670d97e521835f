//! Loan origination wizard: staged intake, KYC verification, mocked credit
//! underwriting, and sanction. The EMI math, eligibility policy, and stage
//! ledger are deterministic contracts; everything conversational around
//! them lives with the UI collaborators.

pub mod catalog;
pub mod domain;
pub mod emi;
pub mod process;
pub mod router;
pub mod sanction;
pub mod service;
pub mod underwriting;
pub mod verification;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, LoanTypeCatalog, LoanTypeConfig, MIN_TENURE_MONTHS};
pub use domain::{
    LoanDecision, LoanPlan, LoanRequest, LoanTypeId, OriginationStage, PlanTier, StageStatus,
};
pub use emi::{compute_emi, EmiError, EmiSchedule};
pub use process::{StageHistoryEntry, StageLedger, TransitionError};
pub use router::origination_router;
pub use sanction::SanctionLetter;
pub use service::{ApplicationStatusView, OriginationError, OriginationService};
pub use underwriting::random::{RandomSource, SeededRandomSource, ThreadRandomSource};
pub use underwriting::{RejectionReason, UnderwritingConfig, UnderwritingEngine, UnderwritingOutcome};
pub use verification::{IdentitySubmission, VerificationDossier, VerificationError};
