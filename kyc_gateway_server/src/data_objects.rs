use serde::{Deserialize, Serialize};
use serde_json::Value;
use sumsub_tools::DocumentReceipt;

pub const DOCUMENT_UPLOADED: &str = "Document uploaded";

/// The response to a successful document upload. `provider_response` is the provider's body, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadAcknowledgement {
    pub status: String,
    pub image_id: Option<String>,
    pub provider_response: Value,
}

impl From<DocumentReceipt> for UploadAcknowledgement {
    fn from(receipt: DocumentReceipt) -> Self {
        Self { status: DOCUMENT_UPLOADED.to_string(), image_id: receipt.image_id, provider_response: receipt.body }
    }
}
