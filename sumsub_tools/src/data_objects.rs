use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// A person to register with Sumsub. Fields that are `None` are left out of the request entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplicant {
    /// Our own reference for the applicant. Sumsub echoes it back as `externalUserId`.
    pub external_user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dob: Option<NaiveDate>,
    /// ISO 3166-1 alpha-3 country code
    pub nationality: Option<String>,
    pub phone: Option<String>,
}

impl NewApplicant {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            external_user_id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            dob: None,
            nationality: None,
            phone: None,
        }
    }

    /// The JSON body for `POST /resources/applicants`.
    pub fn to_request_body(&self) -> Value {
        let mut fixed_info = Map::new();
        fixed_info.insert("firstName".into(), json!(self.first_name));
        fixed_info.insert("lastName".into(), json!(self.last_name));
        if let Some(dob) = &self.dob {
            fixed_info.insert("dob".into(), json!(dob.format("%Y-%m-%d").to_string()));
        }
        if let Some(nationality) = &self.nationality {
            fixed_info.insert("country".into(), json!(nationality));
            fixed_info.insert("nationality".into(), json!(nationality));
        }
        let mut body = json!({
            "externalUserId": self.external_user_id.to_string(),
            "email": self.email,
            "lang": "en",
            "type": "individual",
            "fixedInfo": fixed_info,
        });
        if let Some(phone) = &self.phone {
            body["phone"] = json!(phone);
        }
        body
    }
}

/// The `metadata` part of an id document upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub id_doc_type: String,
    pub id_doc_sub_type: String,
    pub country: String,
}

/// An identity document on its way to Sumsub. Nothing here is stored locally.
#[derive(Clone, PartialEq, Eq)]
pub struct IdDocument {
    pub applicant_id: String,
    /// e.g. PASSPORT, ID_CARD, DRIVERS
    pub doc_type: String,
    /// e.g. FRONT_SIDE, BACK_SIDE
    pub doc_subtype: String,
    /// ISO 3166-1 alpha-3. If `None`, the configured default country is used.
    pub country: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl std::fmt::Debug for IdDocument {
    // Document images are large and sensitive. Print the size only.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdDocument")
            .field("applicant_id", &self.applicant_id)
            .field("doc_type", &self.doc_type)
            .field("doc_subtype", &self.doc_subtype)
            .field("country", &self.country)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("content", &format_args!("{} bytes", self.content.len()))
            .finish()
    }
}

impl IdDocument {
    pub fn metadata(&self, default_country: &str) -> DocumentMetadata {
        DocumentMetadata {
            id_doc_type: self.doc_type.clone(),
            id_doc_sub_type: self.doc_subtype.clone(),
            country: self.country.clone().unwrap_or_else(|| default_country.to_string()),
        }
    }
}

/// Sumsub's answer to a document upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReceipt {
    /// Taken from the `X-Image-Id` response header, when present.
    pub image_id: Option<String>,
    pub body: Value,
}
