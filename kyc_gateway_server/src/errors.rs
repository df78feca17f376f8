use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::{error, warn};
use serde_json::{json, Value};
use sumsub_tools::SumsubApiError;
use thiserror::Error;

use crate::dto::FieldErrors;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Invalid request. {0}")]
    ValidationError(FieldErrors),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("The upload exceeds the limit of {0} bytes")]
    PayloadTooLarge(usize),
    #[error("Could not reach the verification provider. {0}")]
    ConnectivityError(String),
    #[error("The verification provider rejected the request with status {status}")]
    ProviderRejection { status: u16, payload: Value },
    #[error("The verification provider sent a response that could not be read. {0}")]
    ResponseFormatError(String),
    #[error("The data was not found. {message}")]
    NotFound { message: String, payload: Value },
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ConnectivityError(_) => StatusCode::BAD_GATEWAY,
            Self::ProviderRejection { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::ResponseFormatError(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::ValidationError(fields) => json!({ "error": self.to_string(), "fields": fields }),
            Self::ProviderRejection { status, payload } => {
                json!({ "error": self.to_string(), "provider_status": status, "details": payload })
            },
            Self::NotFound { payload, .. } => json!({ "error": self.to_string(), "details": payload }),
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}

impl From<SumsubApiError> for ServerError {
    fn from(e: SumsubApiError) -> Self {
        match e {
            SumsubApiError::Configuration(s) => Self::ConfigurationError(s),
            SumsubApiError::Connectivity(s) => {
                warn!("🌐️ Sumsub is unreachable. {s}");
                Self::ConnectivityError(s)
            },
            SumsubApiError::Rejected { status, payload } => Self::ProviderRejection { status, payload },
            SumsubApiError::ResponseFormat(s) => Self::ResponseFormatError(s),
            SumsubApiError::InvalidRequest(s) => {
                error!("🌐️ Could not build a request for Sumsub. {s}");
                Self::BackendError(s)
            },
        }
    }
}

impl From<FieldErrors> for ServerError {
    fn from(e: FieldErrors) -> Self {
        Self::ValidationError(e)
    }
}
