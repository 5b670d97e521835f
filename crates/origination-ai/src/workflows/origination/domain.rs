use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordered stages of the origination wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginationStage {
    Sales,
    Verification,
    Underwriting,
    Sanction,
}

impl OriginationStage {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Sales,
            Self::Verification,
            Self::Underwriting,
            Self::Sanction,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sales => "Sales Intake",
            Self::Verification => "KYC & Document Verification",
            Self::Underwriting => "Credit Underwriting",
            Self::Sanction => "Loan Sanction",
        }
    }

    /// History summary shown before a stage has produced a result.
    pub(crate) const fn intro_summary(self) -> &'static str {
        match self {
            Self::Sales => "Understanding your loan requirements",
            Self::Verification => "KYC & document verification",
            Self::Underwriting => "Credit assessment",
            Self::Sanction => "Loan sanction letter",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Sales => 0,
            Self::Verification => 1,
            Self::Underwriting => 2,
            Self::Sanction => 3,
        }
    }
}

impl FromStr for OriginationStage {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "verification" => Ok(Self::Verification),
            "underwriting" => Ok(Self::Underwriting),
            "sanction" => Ok(Self::Sanction),
            other => Err(format!("unknown origination stage '{other}'")),
        }
    }
}

/// Per-stage progress marker kept in the stage ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Pending,
    Current,
    Completed,
}

impl StageStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Current => "Current",
            Self::Completed => "Completed",
        }
    }
}

/// Outcome of the credit assessment, `Pending` until underwriting runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanDecision {
    Pending,
    Approved,
    Rejected,
}

impl LoanDecision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Product identifiers backed by the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanTypeId {
    Personal,
    Home,
    Car,
    Education,
    Business,
}

impl LoanTypeId {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Personal,
            Self::Home,
            Self::Car,
            Self::Education,
            Self::Business,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal Loan",
            Self::Home => "Home Loan",
            Self::Car => "Car Loan",
            Self::Education => "Education Loan",
            Self::Business => "Business Loan",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Home => "home",
            Self::Car => "car",
            Self::Education => "education",
            Self::Business => "business",
        }
    }
}

impl FromStr for LoanTypeId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "home" => Ok(Self::Home),
            "car" => Ok(Self::Car),
            "education" => Ok(Self::Education),
            "business" => Ok(Self::Business),
            other => Err(format!("unknown loan type '{other}'")),
        }
    }
}

/// Tiers of the repayment offers synthesized during underwriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Economy,
    Standard,
    Premium,
}

impl PlanTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Economy => "Economy Plan",
            Self::Standard => "Standard Plan",
            Self::Premium => "Premium Plan",
        }
    }
}

impl FromStr for PlanTier {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(Self::Economy),
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            other => Err(format!("unknown plan tier '{other}'")),
        }
    }
}

/// One repayment offer priced around the underwriting base rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPlan {
    pub tier: PlanTier,
    pub interest_rate_pct: f64,
    pub tenure_months: u32,
    pub emi: u64,
    pub total_payable: u64,
}

/// The applicant's ask plus the product terms currently applied to it.
///
/// `interest_rate_pct`, `processing_fee_pct`, and `max_emi_ratio_pct` always
/// mirror the selected loan type; switching types re-syncs them atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub loan_type: LoanTypeId,
    pub amount: u64,
    pub tenure_months: u32,
    pub monthly_income: u64,
    pub emi: u64,
    pub interest_rate_pct: f64,
    pub processing_fee_pct: f64,
    pub max_emi_ratio_pct: f64,
}

impl LoanRequest {
    /// EMI as a percentage of the given monthly income.
    pub fn emi_ratio_pct(&self, monthly_income: u64) -> f64 {
        if monthly_income == 0 {
            return f64::INFINITY;
        }
        self.emi as f64 / monthly_income as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_identifiers_parse_from_their_wire_names() {
        assert_eq!(
            OriginationStage::from_str(" Underwriting "),
            Ok(OriginationStage::Underwriting)
        );
        assert!(OriginationStage::from_str("disbursal").is_err());

        assert_eq!(LoanTypeId::from_str("education"), Ok(LoanTypeId::Education));
        assert!(LoanTypeId::from_str("gold").is_err());

        assert_eq!(PlanTier::from_str("premium"), Ok(PlanTier::Premium));
        assert!(PlanTier::from_str("platinum").is_err());
    }
}
