use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use sumsub_tools::NewApplicant;

use super::validation::{is_valid_email, optional_text, required_text, FieldErrors, NOT_A_STRING};

const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 254;
const MAX_NATIONALITY_LEN: usize = 3;
const MAX_PHONE_LEN: usize = 20;

/// The body of `POST /applicant/create/`.
///
/// Fields are kept as raw JSON until validation so that a wrongly typed field is reported against that field rather
/// than failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicantRequest {
    #[serde(default)]
    pub first_name: Option<Value>,
    #[serde(default)]
    pub last_name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    /// YYYY-MM-DD
    #[serde(default)]
    pub dob: Option<Value>,
    /// ISO 3166-1 alpha-3, e.g. "DEU"
    #[serde(default)]
    pub nationality: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
}

impl ApplicantRequest {
    /// Parses a request body. Anything other than a JSON object is reported under `non_field_errors`.
    pub fn from_slice(body: &[u8]) -> Result<Self, FieldErrors> {
        serde_json::from_slice::<Self>(body).map_err(|e| {
            let mut errors = FieldErrors::default();
            errors.add("non_field_errors", &format!("Expected a JSON object. {e}"));
            errors
        })
    }

    pub fn validate(&self) -> Result<NewApplicant, FieldErrors> {
        let mut errors = FieldErrors::default();
        let first_name = required(&mut errors, "first_name", &self.first_name, MAX_NAME_LEN);
        let last_name = required(&mut errors, "last_name", &self.last_name, MAX_NAME_LEN);
        let email = required(&mut errors, "email", &self.email, MAX_EMAIL_LEN).filter(|email| {
            let valid = is_valid_email(email);
            if !valid {
                errors.add("email", "Enter a valid email address.");
            }
            valid
        });
        let dob = optional(&mut errors, "dob", &self.dob, 10).and_then(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|_| errors.add("dob", "Date has wrong format. Use YYYY-MM-DD."))
                .ok()
        });
        let nationality = optional(&mut errors, "nationality", &self.nationality, MAX_NATIONALITY_LEN).and_then(|s| {
            if s.chars().all(|c| c.is_ascii_alphabetic()) {
                Some(s.to_ascii_uppercase())
            } else {
                errors.add("nationality", "Enter a valid country code.");
                None
            }
        });
        let phone = optional(&mut errors, "phone", &self.phone, MAX_PHONE_LEN);
        match (first_name, last_name, email) {
            (Some(first_name), Some(last_name), Some(email)) => {
                let mut applicant = NewApplicant::new(&first_name, &last_name, &email);
                applicant.dob = dob;
                applicant.nationality = nationality;
                applicant.phone = phone;
                errors.into_result(applicant)
            },
            _ => Err(errors),
        }
    }
}

fn required(errors: &mut FieldErrors, field: &str, value: &Option<Value>, max_len: usize) -> Option<String> {
    match value {
        None | Some(Value::Null) => required_text(errors, field, None, max_len),
        Some(Value::String(s)) => required_text(errors, field, Some(s), max_len),
        Some(_) => {
            errors.add(field, NOT_A_STRING);
            None
        },
    }
}

fn optional(errors: &mut FieldErrors, field: &str, value: &Option<Value>, max_len: usize) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => optional_text(errors, field, Some(s), max_len),
        Some(_) => {
            errors.add(field, NOT_A_STRING);
            None
        },
    }
}
