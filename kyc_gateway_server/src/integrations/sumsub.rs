//! Connects [`SumsubApi`] to the gateway's [`VerificationProvider`] seam.
use serde_json::Value;
use sumsub_tools::{DocumentReceipt, IdDocument, NewApplicant, SumsubApi, SumsubApiError};

use crate::provider::VerificationProvider;

impl VerificationProvider for SumsubApi {
    async fn create_applicant(&self, applicant: &NewApplicant) -> Result<Value, SumsubApiError> {
        SumsubApi::create_applicant(self, applicant).await.map(|r| r.body)
    }

    async fn add_document(&self, document: &IdDocument) -> Result<DocumentReceipt, SumsubApiError> {
        SumsubApi::add_document(self, document).await
    }

    async fn get_verification_status(&self, applicant_id: &str) -> Result<Value, SumsubApiError> {
        SumsubApi::get_verification_status(self, applicant_id).await.map(|r| r.body)
    }
}
