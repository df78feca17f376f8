use mockall::mock;
use serde_json::Value;
use sumsub_tools::{DocumentReceipt, IdDocument, NewApplicant, SumsubApiError};

use crate::provider::VerificationProvider;

mock! {
    pub Provider {}
    impl VerificationProvider for Provider {
        async fn create_applicant(&self, applicant: &NewApplicant) -> Result<Value, SumsubApiError>;
        async fn add_document(&self, document: &IdDocument) -> Result<DocumentReceipt, SumsubApiError>;
        async fn get_verification_status(&self, applicant_id: &str) -> Result<Value, SumsubApiError>;
    }
}
