//! Inbound request objects and their validation.
//!
//! Validation collects every problem it finds, per field, rather than stopping at the first one. Callers get a
//! 400 with the complete list, and the provider is never called with a request that failed validation.
mod applicant;
mod document;
mod validation;

pub use applicant::ApplicantRequest;
pub use document::{DocumentUploadForm, UploadedFile};
pub use validation::FieldErrors;

/// Validates an applicant id taken from a request path.
pub fn applicant_id_from_path(id: String) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::default();
    match validation::check_applicant_id(&mut errors, "applicant_id", id) {
        Some(id) => errors.into_result(id),
        None => Err(errors),
    }
}
