//! Unifies the API for the gateway's three operations.

use std::fmt::Debug;

use log::*;
use serde_json::Value;
use sumsub_tools::{DocumentReceipt, IdDocument, NewApplicant, SumsubApiError};

use crate::{errors::ServerError, provider::VerificationProvider};

/// `KycApi` sits between the route handlers and a [`VerificationProvider`] and translates provider failures into
/// [`ServerError`]s.
pub struct KycApi<P> {
    provider: P,
}

impl<P: Debug> Debug for KycApi<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KycApi ({:?})", self.provider)
    }
}

impl<P> KycApi<P>
where P: VerificationProvider
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn create_applicant(&self, applicant: NewApplicant) -> Result<Value, ServerError> {
        trace!("🪪️ Creating applicant {}", applicant.external_user_id);
        let record = self.provider.create_applicant(&applicant).await.map_err(|e| {
            debug!("🪪️ Could not create applicant {}. {e}", applicant.external_user_id);
            ServerError::from(e)
        })?;
        Ok(record)
    }

    pub async fn upload_document(&self, document: IdDocument) -> Result<DocumentReceipt, ServerError> {
        trace!("🪪️ Uploading {} for applicant {}", document.doc_type, document.applicant_id);
        let receipt = self.provider.add_document(&document).await.map_err(|e| {
            debug!("🪪️ Could not upload {} for applicant {}. {e}", document.doc_type, document.applicant_id);
            ServerError::from(e)
        })?;
        Ok(receipt)
    }

    /// Fetches the review status for `applicant_id`. If the provider does not know the applicant, this returns
    /// [`ServerError::NotFound`].
    pub async fn verification_status(&self, applicant_id: &str) -> Result<Value, ServerError> {
        trace!("🪪️ Fetching status for applicant {applicant_id}");
        match self.provider.get_verification_status(applicant_id).await {
            Ok(status) => Ok(status),
            Err(SumsubApiError::Rejected { status: 404, payload }) => {
                info!("🪪️ Applicant {applicant_id} is not known to the provider");
                Err(ServerError::NotFound { message: format!("Applicant {applicant_id} does not exist"), payload })
            },
            Err(e) => {
                debug!("🪪️ Could not fetch status for applicant {applicant_id}. {e}");
                Err(e.into())
            },
        }
    }
}
