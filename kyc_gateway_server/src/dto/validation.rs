use std::{collections::BTreeMap, fmt, sync::OnceLock};

use regex::Regex;
use serde::Serialize;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const INVALID_APPLICANT_ID: &str = "Enter a valid applicant id.";

/// Validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0.entry(field.to_string()).or_default().push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|v| v.as_slice())
    }

    /// `Ok(value)` if no errors were recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.iter().map(|(k, v)| format!("{k}: {}", v.join(" "))).collect::<Vec<_>>().join("; ");
        f.write_str(&s)
    }
}

/// A required string field: present, non-blank and at most `max_len` characters. Returns the trimmed value if it is
/// valid and records the problem otherwise.
pub fn required_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max_len: usize) -> Option<String> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        },
        Some(s) => optional_text(errors, field, Some(s), max_len).or_else(|| {
            if s.trim().is_empty() {
                errors.add(field, BLANK);
            }
            None
        }),
    }
}

/// An optional string field. Blank values count as absent.
pub fn optional_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max_len: usize) -> Option<String> {
    let s = value.map(str::trim).filter(|s| !s.is_empty())?;
    if s.chars().count() > max_len {
        errors.add(field, &format!("Ensure this field has no more than {max_len} characters."));
        return None;
    }
    Some(s.to_string())
}

/// Applicant ids end up as a path segment of a provider URL, where `.` and `..` would be resolved away.
pub fn check_applicant_id(errors: &mut FieldErrors, field: &str, id: String) -> Option<String> {
    if matches!(id.as_str(), "." | "..") {
        errors.add(field, INVALID_APPLICANT_ID);
        return None;
    }
    Some(id)
}

pub fn is_valid_email(s: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").unwrap());
    re.is_match(s)
}
