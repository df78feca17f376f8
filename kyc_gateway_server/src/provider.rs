use serde_json::Value;
use sumsub_tools::{DocumentReceipt, IdDocument, NewApplicant, SumsubApiError};

/// The `VerificationProvider` trait defines the calls the gateway makes to an identity verification service.
///
/// [`sumsub_tools::SumsubApi`] is the production implementation (see [`crate::integrations::sumsub`]). Responses are
/// returned as raw JSON, since the gateway passes them on to its callers without reshaping them.
#[allow(async_fn_in_trait)]
pub trait VerificationProvider {
    /// Registers a new applicant and returns the provider's record for it, which includes the applicant id.
    async fn create_applicant(&self, applicant: &NewApplicant) -> Result<Value, SumsubApiError>;

    /// Attaches an identity document to an existing applicant.
    async fn add_document(&self, document: &IdDocument) -> Result<DocumentReceipt, SumsubApiError>;

    /// Fetches the current review status of an applicant. Unknown applicants produce a
    /// [`SumsubApiError::Rejected`] with status 404.
    async fn get_verification_status(&self, applicant_id: &str) -> Result<Value, SumsubApiError>;
}
