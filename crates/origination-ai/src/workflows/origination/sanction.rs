//! Flattened sanction snapshot handed to document-rendering collaborators,
//! plus a plain-text rendering used by the CLI demo.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{LoanPlan, LoanTypeId};

/// Everything the sanction document needs, denormalized from the request
/// and the selected plan at confirmation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanctionLetter {
    pub reference: String,
    pub customer_name: String,
    pub loan_type: LoanTypeId,
    pub sanctioned_amount: u64,
    pub interest_rate_pct: f64,
    pub tenure_months: u32,
    pub emi: u64,
    pub total_payable: u64,
    pub processing_fee: u64,
    pub approved_on: DateTime<Utc>,
}

impl SanctionLetter {
    pub(crate) fn new(
        customer_name: String,
        loan_type: LoanTypeId,
        sanctioned_amount: u64,
        plan: &LoanPlan,
        processing_fee: u64,
        approved_on: DateTime<Utc>,
    ) -> Self {
        let reference = format!(
            "LO/{}/{:08}",
            loan_type.key().to_ascii_uppercase(),
            approved_on.timestamp().rem_euclid(100_000_000)
        );

        Self {
            reference,
            customer_name,
            loan_type,
            sanctioned_amount,
            interest_rate_pct: plan.interest_rate_pct,
            tenure_months: plan.tenure_months,
            emi: plan.emi,
            total_payable: plan.total_payable,
            processing_fee,
            approved_on,
        }
    }

    /// Plain-text letter body. Page layout belongs to the document
    /// collaborator, not the core.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("LOAN SANCTION LETTER\n");
        out.push_str(&format!(
            "Ref: {} | Date: {}\n\n",
            self.reference,
            self.approved_on.format("%d %B %Y")
        ));
        out.push_str(&format!("Dear {},\n\n", self.customer_name));
        out.push_str(&format!(
            "We are pleased to inform you that your application for a {} has\nbeen approved. The sanctioned terms are:\n\n",
            self.loan_type.label()
        ));
        out.push_str(&format!(
            "  Sanctioned Loan Amount : {}\n",
            self.sanctioned_amount
        ));
        out.push_str(&format!(
            "  Rate of Interest (p.a.): {}%\n",
            self.interest_rate_pct
        ));
        out.push_str(&format!(
            "  Loan Tenure            : {} months\n",
            self.tenure_months
        ));
        out.push_str(&format!("  Monthly EMI            : {}\n", self.emi));
        out.push_str(&format!(
            "  Processing Fee         : {}\n",
            self.processing_fee
        ));
        out.push_str(&format!(
            "  Total Repayment        : {}\n\n",
            self.total_payable
        ));
        out.push_str("Terms and conditions:\n");
        out.push_str("  1. This sanction letter is valid for 30 days from the date of issue.\n");
        out.push_str("  2. Disbursement is subject to completion of documentation and verification.\n");
        out.push_str("  3. The interest rate is subject to change based on market conditions.\n");
        out.push_str("  4. EMI is auto-debited from the registered bank account.\n");
        out.push_str("  5. Prepayment is allowed after six months without charges.\n");
        out
    }
}
