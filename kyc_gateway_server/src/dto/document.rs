use actix_multipart::Multipart;
use futures::StreamExt;
use log::*;
use sumsub_tools::IdDocument;

use super::validation::{check_applicant_id, optional_text, required_text, FieldErrors, NOT_A_STRING, REQUIRED};
use crate::errors::ServerError;

const MAX_FIELD_LEN: usize = 255;
const MAX_COUNTRY_LEN: usize = 3;
const DEFAULT_FILE_NAME: &str = "document_file";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UploadedFile({:?}, {:?}, {} bytes)", self.file_name, self.content_type, self.content.len())
    }
}

/// The fields of a `POST /applicant/upload-document/` form, as received. Text fields that were not valid UTF-8 are
/// recorded in `invalid_text` so that validation can report them.
#[derive(Debug, Clone, Default)]
pub struct DocumentUploadForm {
    pub applicant_id: Option<String>,
    pub doc_type: Option<String>,
    pub doc_subtype: Option<String>,
    pub country: Option<String>,
    pub document_file: Option<UploadedFile>,
    pub invalid_text: Vec<String>,
}

impl DocumentUploadForm {
    /// Reads the whole multipart payload into memory. Fails with [`ServerError::PayloadTooLarge`] as soon as the sum of
    /// all parts exceeds `max_bytes`.
    pub async fn from_multipart(mut payload: Multipart, max_bytes: usize) -> Result<Self, ServerError> {
        let mut form = Self::default();
        let mut total = 0usize;
        while let Some(field) = payload.next().await {
            let mut field = field.map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?;
            let disposition = field.content_disposition();
            let name = disposition.get_name().unwrap_or_default().to_string();
            let file_name = disposition.get_filename().map(String::from);
            let content_type = field.content_type().map(|m| m.to_string());
            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?;
                total += chunk.len();
                if total > max_bytes {
                    warn!("📄️ Upload rejected. It exceeds the limit of {max_bytes} bytes");
                    return Err(ServerError::PayloadTooLarge(max_bytes));
                }
                data.extend_from_slice(&chunk);
            }
            match name.as_str() {
                "document_file" => form.document_file = Some(UploadedFile { file_name, content_type, content: data }),
                "applicant_id" | "doc_type" | "doc_subtype" | "country" => match String::from_utf8(data) {
                    Ok(s) => form.set_text(&name, s),
                    Err(_) => form.invalid_text.push(name.clone()),
                },
                other => debug!("📄️ Ignoring unexpected form field '{other}'"),
            }
        }
        Ok(form)
    }

    fn set_text(&mut self, name: &str, value: String) {
        let slot = match name {
            "applicant_id" => &mut self.applicant_id,
            "doc_type" => &mut self.doc_type,
            "doc_subtype" => &mut self.doc_subtype,
            _ => &mut self.country,
        };
        *slot = Some(value);
    }

    pub fn validate(self) -> Result<IdDocument, FieldErrors> {
        let mut errors = FieldErrors::default();
        for name in &self.invalid_text {
            errors.add(name, NOT_A_STRING);
        }
        let applicant_id = self
            .text(&mut errors, "applicant_id", self.applicant_id.as_deref(), MAX_FIELD_LEN)
            .and_then(|id| check_applicant_id(&mut errors, "applicant_id", id));
        let doc_type = self.text(&mut errors, "doc_type", self.doc_type.as_deref(), MAX_FIELD_LEN);
        let doc_subtype = self.text(&mut errors, "doc_subtype", self.doc_subtype.as_deref(), MAX_FIELD_LEN);
        let country = optional_text(&mut errors, "country", self.country.as_deref(), MAX_COUNTRY_LEN)
            .map(|s| s.to_ascii_uppercase());
        let file = match self.document_file {
            None => {
                errors.add("document_file", REQUIRED);
                None
            },
            Some(f) if f.content.is_empty() => {
                errors.add("document_file", "The submitted file is empty.");
                None
            },
            Some(f) => Some(f),
        };
        match (applicant_id, doc_type, doc_subtype, file) {
            (Some(applicant_id), Some(doc_type), Some(doc_subtype), Some(file)) => errors.into_result(IdDocument {
                applicant_id,
                doc_type,
                doc_subtype,
                country,
                file_name: file.file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
                content_type: file.content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
                content: file.content,
            }),
            _ => Err(errors),
        }
    }

    // Fields that failed UTF-8 decoding already have an error and are not reported as missing as well.
    fn text(&self, errors: &mut FieldErrors, field: &str, value: Option<&str>, max_len: usize) -> Option<String> {
        if self.invalid_text.iter().any(|n| n == field) {
            return None;
        }
        required_text(errors, field, value, max_len)
    }
}
