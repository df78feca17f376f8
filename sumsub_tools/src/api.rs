use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client,
    Method,
};
use serde_json::Value;
use url::{Position, Url};
use urlencoding::encode;

use crate::{
    config::SumsubConfig,
    data_objects::{DocumentReceipt, IdDocument, NewApplicant},
    multipart::MultipartBody,
    signer::RequestSigner,
    SumsubApiError,
};

const IMAGE_ID_HEADER: &str = "X-Image-Id";
const RETURN_DOC_WARNINGS_HEADER: &str = "X-Return-Doc-Warnings";

/// A successful (2xx) response from Sumsub. The body is passed on as-is.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ProviderResponse {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(name).and_then(|v| v.to_str().ok()).map(String::from)
    }
}

#[derive(Clone)]
pub struct SumsubApi {
    config: SumsubConfig,
    signer: RequestSigner,
    client: Arc<Client>,
}

impl SumsubApi {
    pub fn new(config: SumsubConfig) -> Result<Self, SumsubApiError> {
        let signer = RequestSigner::from_config(&config)?;
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| SumsubApiError::Configuration(e.to_string()))?;
        Ok(Self { config, signer, client: Arc::new(client) })
    }

    /// The full URL for a provider-relative path (which may include a query string).
    pub fn url(&self, path: &str) -> Result<Url, SumsubApiError> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}")).map_err(|e| SumsubApiError::InvalidRequest(format!("{path}: {e}")))
    }

    /// Signs and sends a single request. `body` is the content type and the exact bytes to send; it is ignored for
    /// GET requests.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<(String, Vec<u8>)>,
        extra_headers: HeaderMap,
    ) -> Result<ProviderResponse, SumsubApiError> {
        let url = self.url(path)?;
        // Sign what actually goes on the wire: the parsed path (including any base URL prefix) and query
        let signed_path = url[Position::BeforePath..].to_string();
        let body = if method == Method::GET { None } else { body };
        let payload = body.as_ref().map(|(_, bytes)| bytes.as_slice()).unwrap_or_default();
        let auth = self.signer.sign_now(&method, &signed_path, payload).to_header_map()?;
        trace!("Sending {method} {url} ({} bytes)", payload.len());
        let mut req = self.client.request(method.clone(), url).headers(extra_headers).headers(auth);
        if let Some((content_type, bytes)) = body {
            let content_type = HeaderValue::from_str(&content_type)
                .map_err(|e| SumsubApiError::InvalidRequest(format!("Invalid content type. {e}")))?;
            req = req.header(CONTENT_TYPE, content_type).body(bytes);
        }
        let response = req.send().await.map_err(|e| {
            warn!("{method} {signed_path} failed before Sumsub responded. {e}");
            SumsubApiError::Connectivity(e.to_string())
        })?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(|e| SumsubApiError::Connectivity(e.to_string()))?;
        if status.is_success() {
            trace!("{method} {signed_path} successful. {status}");
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice::<Value>(&bytes).map_err(|e| {
                    warn!("Sumsub returned {status} for {method} {signed_path}, but the body is not JSON. {e}");
                    SumsubApiError::ResponseFormat(e.to_string())
                })?
            };
            Ok(ProviderResponse { status: status.as_u16(), headers, body })
        } else {
            let payload = serde_json::from_slice::<Value>(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
            debug!("Sumsub rejected {method} {signed_path}. {status}: {payload}");
            Err(SumsubApiError::Rejected { status: status.as_u16(), payload })
        }
    }

    pub async fn create_applicant(&self, applicant: &NewApplicant) -> Result<ProviderResponse, SumsubApiError> {
        let path = format!("/resources/applicants?levelName={}", encode(&self.config.level_name));
        let body = serde_json::to_vec(&applicant.to_request_body())
            .map_err(|e| SumsubApiError::InvalidRequest(e.to_string()))?;
        debug!("Creating applicant {}", applicant.external_user_id);
        let result =
            self.send(Method::POST, &path, Some(("application/json".to_string(), body)), HeaderMap::new()).await?;
        info!("Created applicant {} on level {}", applicant.external_user_id, self.config.level_name);
        Ok(result)
    }

    pub async fn add_document(&self, document: &IdDocument) -> Result<DocumentReceipt, SumsubApiError> {
        let path = applicant_path(&document.applicant_id, "info/idDoc")?;
        let metadata = serde_json::to_string(&document.metadata(&self.config.document_country))
            .map_err(|e| SumsubApiError::InvalidRequest(e.to_string()))?;
        let form = MultipartBody::new().text("metadata", &metadata).file(
            "content",
            &document.file_name,
            &document.content_type,
            &document.content,
        );
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(RETURN_DOC_WARNINGS_HEADER, HeaderValue::from_static("true"));
        debug!("Uploading {} {} for applicant {}", document.doc_type, document.doc_subtype, document.applicant_id);
        let response = self.send(Method::POST, &path, Some(form.finish()), headers).await?;
        let image_id = response.header(IMAGE_ID_HEADER);
        info!("Uploaded {} for applicant {}. Image id: {image_id:?}", document.doc_type, document.applicant_id);
        Ok(DocumentReceipt { image_id, body: response.body })
    }

    pub async fn get_verification_status(&self, applicant_id: &str) -> Result<ProviderResponse, SumsubApiError> {
        let path = applicant_path(applicant_id, "status")?;
        debug!("Fetching verification status for applicant {applicant_id}");
        self.send(Method::GET, &path, None, HeaderMap::new()).await
    }
}

/// The provider path for a resource belonging to `applicant_id`. The URL parser resolves `.` and `..` segments away,
/// which would silently address a different endpoint, so those ids are refused.
fn applicant_path(applicant_id: &str, resource: &str) -> Result<String, SumsubApiError> {
    if matches!(applicant_id, "" | "." | "..") {
        return Err(SumsubApiError::InvalidRequest(format!("'{applicant_id}' is not a valid applicant id")));
    }
    Ok(format!("/resources/applicants/{}/{resource}", encode(applicant_id)))
}
