use kyc_common::EnvError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SumsubApiError {
    #[error("Invalid Sumsub configuration: {0}")]
    Configuration(String),
    #[error("Could not reach the Sumsub API: {0}")]
    Connectivity(String),
    #[error("Sumsub rejected the request. Error {status}. {payload}")]
    Rejected { status: u16, payload: Value },
    #[error("Sumsub sent a response that could not be understood: {0}")]
    ResponseFormat(String),
    #[error("Could not build the request: {0}")]
    InvalidRequest(String),
}

impl SumsubApiError {
    /// True if the provider answered with 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Rejected { status: 404, .. })
    }
}

impl From<EnvError> for SumsubApiError {
    fn from(e: EnvError) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<reqwest::Error> for SumsubApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            Self::InvalidRequest(e.to_string())
        } else {
            Self::Connectivity(e.to_string())
        }
    }
}
