//! Applicant identity capture and mocked salary-slip parsing. There is no
//! real KYC backend; parsing draws a plausible income and employer through
//! the injected random source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::underwriting::random::RandomSource;

pub(crate) const SALARY_SLIP_EMPLOYERS: [&str; 4] = [
    "Tata Consultancy Services",
    "Infosys Ltd",
    "Wipro Technologies",
    "Tech Mahindra",
];

/// Malformed identity fields rejected before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("full name must be at least three characters")]
    NameTooShort,
    #[error("PAN must match the AAAAA9999A format")]
    MalformedPan,
    #[error("Aadhaar must be exactly twelve digits")]
    MalformedAadhaar,
}

/// Identity fields captured uniformly from every applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySubmission {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub employer_name: String,
    pub pan: String,
    pub aadhaar: String,
}

/// Everything verification has gathered so far. Underwriting reads the
/// parsed income when present and the declared income otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationDossier {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub employer_name: String,
    pub pan: String,
    pub aadhaar: String,
    pub salary_slip: Option<String>,
    pub parsed_income: Option<u64>,
    pub parsed_employer: Option<String>,
}

impl VerificationDossier {
    /// Validate and store the identity fields atomically; nothing is
    /// written when any field is malformed.
    pub(crate) fn record_identity(
        &mut self,
        submission: IdentitySubmission,
    ) -> Result<(), VerificationError> {
        let full_name = submission.full_name.trim().to_string();
        if full_name.chars().count() < 3 {
            return Err(VerificationError::NameTooShort);
        }

        let pan = submission.pan.trim().to_ascii_uppercase();
        if !pan_is_valid(&pan) {
            return Err(VerificationError::MalformedPan);
        }

        let aadhaar: String = submission
            .aadhaar
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if !aadhaar_is_valid(&aadhaar) {
            return Err(VerificationError::MalformedAadhaar);
        }

        self.full_name = full_name;
        self.date_of_birth = Some(submission.date_of_birth);
        self.employer_name = submission.employer_name.trim().to_string();
        self.pan = pan;
        self.aadhaar = aadhaar;
        Ok(())
    }

    /// Mock-parse an uploaded salary slip: income within ±10% of the
    /// declared figure, employer from the canned list.
    pub(crate) fn attach_salary_slip(
        &mut self,
        file_name: &str,
        declared_income: u64,
        random: &mut dyn RandomSource,
    ) {
        let ratio = random.next_in_range(0.9, 1.1);
        let parsed_income = (declared_income as f64 * ratio).round() as u64;
        let index = random
            .next_in_range(0.0, SALARY_SLIP_EMPLOYERS.len() as f64)
            .floor() as usize;
        let employer = SALARY_SLIP_EMPLOYERS[index.min(SALARY_SLIP_EMPLOYERS.len() - 1)];

        self.salary_slip = Some(file_name.to_string());
        self.parsed_income = Some(parsed_income);
        self.parsed_employer = Some(employer.to_string());
    }

    pub fn identity_recorded(&self) -> bool {
        !self.full_name.is_empty()
    }

    pub fn documents_present(&self) -> bool {
        self.salary_slip.is_some() && self.parsed_income.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.identity_recorded() && self.documents_present()
    }

    pub fn verified_income(&self, declared_income: u64) -> u64 {
        self.parsed_income.unwrap_or(declared_income)
    }

    pub fn verified_employer(&self) -> &str {
        self.parsed_employer
            .as_deref()
            .unwrap_or(&self.employer_name)
    }
}

fn pan_is_valid(pan: &str) -> bool {
    let bytes = pan.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(|b| b.is_ascii_uppercase())
        && bytes[5..9].iter().all(|b| b.is_ascii_digit())
        && bytes[9].is_ascii_uppercase()
}

fn aadhaar_is_valid(aadhaar: &str) -> bool {
    aadhaar.len() == 12 && aadhaar.bytes().all(|b| b.is_ascii_digit())
}
