//! Static product catalog parameterizing pricing and eligibility per loan
//! type. The figures are product configuration, not algorithm.

use serde::Serialize;

use super::domain::LoanTypeId;

/// Shortest tenure any product may be written for, in months.
pub const MIN_TENURE_MONTHS: u32 = 12;

/// Immutable per-product terms applied to a loan request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanTypeConfig {
    pub id: LoanTypeId,
    pub display_name: &'static str,
    pub annual_rate_pct: f64,
    pub min_amount: u64,
    pub max_amount: u64,
    pub max_tenure_months: u32,
    pub min_monthly_income: u64,
    pub max_emi_ratio_pct: f64,
    pub processing_fee_pct: f64,
}

impl LoanTypeConfig {
    pub fn amount_in_range(&self, amount: u64) -> bool {
        (self.min_amount..=self.max_amount).contains(&amount)
    }

    pub fn tenure_in_range(&self, tenure_months: u32) -> bool {
        (MIN_TENURE_MONTHS..=self.max_tenure_months).contains(&tenure_months)
    }

    /// Clamp used only when the applicant switches products; direct edits
    /// outside the range are rejected instead.
    pub fn clamp_amount(&self, amount: u64) -> u64 {
        amount.clamp(self.min_amount, self.max_amount)
    }

    pub fn clamp_tenure(&self, tenure_months: u32) -> u32 {
        tenure_months.clamp(MIN_TENURE_MONTHS, self.max_tenure_months)
    }

    pub fn processing_fee_for(&self, amount: u64) -> u64 {
        (amount as f64 * self.processing_fee_pct / 100.0).round() as u64
    }
}

/// Lookup failures for a custom (non-standard) catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("loan type {0:?} is not offered by this catalog")]
    UnknownLoanType(LoanTypeId),
    #[error("invalid terms for {id:?}: {reason}")]
    InvalidConfig { id: LoanTypeId, reason: &'static str },
}

/// Product table consulted for request bounds and pricing terms.
#[derive(Debug, Clone)]
pub struct LoanTypeCatalog {
    entries: Vec<LoanTypeConfig>,
}

impl LoanTypeCatalog {
    /// The reference five-product table.
    pub fn standard() -> Self {
        Self {
            entries: standard_entries(),
        }
    }

    /// Build a catalog from custom terms, rejecting inverted amount bounds
    /// and tenures shorter than [`MIN_TENURE_MONTHS`].
    pub fn new(entries: Vec<LoanTypeConfig>) -> Result<Self, CatalogError> {
        for entry in &entries {
            if entry.min_amount > entry.max_amount {
                return Err(CatalogError::InvalidConfig {
                    id: entry.id,
                    reason: "minimum amount exceeds maximum amount",
                });
            }
            if entry.max_tenure_months < MIN_TENURE_MONTHS {
                return Err(CatalogError::InvalidConfig {
                    id: entry.id,
                    reason: "maximum tenure below the twelve month floor",
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, id: LoanTypeId) -> Result<&LoanTypeConfig, CatalogError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(CatalogError::UnknownLoanType(id))
    }

    pub fn entries(&self) -> &[LoanTypeConfig] {
        &self.entries
    }
}

fn standard_entries() -> Vec<LoanTypeConfig> {
    vec![
        LoanTypeConfig {
            id: LoanTypeId::Personal,
            display_name: "Personal Loan",
            annual_rate_pct: 12.0,
            min_amount: 50_000,
            max_amount: 5_000_000,
            max_tenure_months: 60,
            min_monthly_income: 15_000,
            max_emi_ratio_pct: 50.0,
            processing_fee_pct: 1.0,
        },
        LoanTypeConfig {
            id: LoanTypeId::Home,
            display_name: "Home Loan",
            annual_rate_pct: 8.5,
            min_amount: 500_000,
            max_amount: 50_000_000,
            max_tenure_months: 240,
            min_monthly_income: 25_000,
            max_emi_ratio_pct: 55.0,
            processing_fee_pct: 0.5,
        },
        LoanTypeConfig {
            id: LoanTypeId::Car,
            display_name: "Car Loan",
            annual_rate_pct: 9.5,
            min_amount: 100_000,
            max_amount: 2_500_000,
            max_tenure_months: 84,
            min_monthly_income: 20_000,
            max_emi_ratio_pct: 50.0,
            processing_fee_pct: 0.75,
        },
        LoanTypeConfig {
            id: LoanTypeId::Education,
            display_name: "Education Loan",
            annual_rate_pct: 10.5,
            min_amount: 100_000,
            max_amount: 7_500_000,
            max_tenure_months: 180,
            min_monthly_income: 12_000,
            max_emi_ratio_pct: 60.0,
            processing_fee_pct: 0.25,
        },
        LoanTypeConfig {
            id: LoanTypeId::Business,
            display_name: "Business Loan",
            annual_rate_pct: 14.0,
            min_amount: 200_000,
            max_amount: 20_000_000,
            max_tenure_months: 120,
            min_monthly_income: 30_000,
            max_emi_ratio_pct: 45.0,
            processing_fee_pct: 1.5,
        },
    ]
}
