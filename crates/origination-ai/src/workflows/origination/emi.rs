//! Equated-monthly-installment math shared by quoting, underwriting, and
//! sanction. Pure and cheap enough to recompute on every input change.

use serde::{Deserialize, Serialize};

/// Amortization figures derived from a principal, annual rate, and tenure.
///
/// Monetary fields are whole currency units rounded to nearest; the share
/// percentages are computed from the rounded totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmiSchedule {
    pub emi: u64,
    pub total_payable: u64,
    pub total_interest: u64,
    pub principal_share_pct: u8,
    pub interest_share_pct: u8,
}

/// Malformed numeric input rejected before any computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmiError {
    #[error("principal must be positive")]
    NonPositivePrincipal,
    #[error("tenure must be at least one month")]
    NonPositiveTenure,
    #[error("interest rate must be a finite, non-negative percentage")]
    InvalidRate,
}

/// Standard amortization: `EMI = P·r·(1+r)^n / ((1+r)^n − 1)` with the
/// monthly rate `r = annual / 12 / 100`, degenerating to an even split when
/// the rate is zero.
pub fn compute_emi(
    principal: u64,
    annual_rate_pct: f64,
    tenure_months: u32,
) -> Result<EmiSchedule, EmiError> {
    if principal == 0 {
        return Err(EmiError::NonPositivePrincipal);
    }
    if tenure_months == 0 {
        return Err(EmiError::NonPositiveTenure);
    }
    if !annual_rate_pct.is_finite() || annual_rate_pct < 0.0 {
        return Err(EmiError::InvalidRate);
    }

    let n = tenure_months as f64;
    let monthly_rate = annual_rate_pct / 12.0 / 100.0;

    if monthly_rate == 0.0 {
        let emi = (principal as f64 / n).round() as u64;
        return Ok(EmiSchedule {
            emi,
            total_payable: principal,
            total_interest: 0,
            principal_share_pct: 100,
            interest_share_pct: 0,
        });
    }

    let growth = (1.0 + monthly_rate).powf(n);
    let raw_emi = principal as f64 * monthly_rate * growth / (growth - 1.0);
    let raw_total = raw_emi * n;
    let raw_interest = raw_total - principal as f64;

    let total_payable = raw_total.round() as u64;
    let total_interest = raw_interest.round() as u64;

    Ok(EmiSchedule {
        emi: raw_emi.round() as u64,
        total_payable,
        total_interest,
        principal_share_pct: share_pct(principal, total_payable),
        interest_share_pct: share_pct(total_interest, total_payable),
    })
}

fn share_pct(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}
