//! Request signing for the Sumsub API.
//!
//! Sumsub authenticates every call with three headers:
//! * `X-App-Token`: the app token,
//! * `X-App-Access-Ts`: the Unix time (in seconds) at which the request was signed,
//! * `X-App-Access-Sig`: the lowercase hex HMAC-SHA256 of `ts + METHOD + path + body`, keyed with the secret key.
//!
//! `path` is everything after the host, including the query string. `body` is the exact byte sequence that goes on
//! the wire, which is why multipart bodies are encoded up front (see [`crate::multipart`]).
use chrono::Utc;
use hmac::{Hmac, Mac};
use kyc_common::Secret;
use log::trace;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use sha2::Sha256;

use crate::{SumsubApiError, SumsubConfig};

pub const APP_TOKEN_HEADER: &str = "X-App-Token";
pub const APP_ACCESS_TS_HEADER: &str = "X-App-Access-Ts";
pub const APP_ACCESS_SIG_HEADER: &str = "X-App-Access-Sig";

type HmacSha256 = Hmac<Sha256>;

/// The authentication headers for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub app_token: String,
    pub timestamp: i64,
    pub signature: String,
}

impl SignedHeaders {
    pub fn to_header_map(&self) -> Result<HeaderMap, SumsubApiError> {
        let mut headers = HeaderMap::with_capacity(3);
        let token = HeaderValue::from_str(&self.app_token)
            .map_err(|e| SumsubApiError::InvalidRequest(format!("The app token is not a valid header value. {e}")))?;
        headers.insert(APP_TOKEN_HEADER, token);
        headers.insert(APP_ACCESS_TS_HEADER, HeaderValue::from(self.timestamp));
        let sig = HeaderValue::from_str(&self.signature)
            .map_err(|e| SumsubApiError::InvalidRequest(format!("Invalid signature header. {e}")))?;
        headers.insert(APP_ACCESS_SIG_HEADER, sig);
        Ok(headers)
    }
}

#[derive(Clone)]
pub struct RequestSigner {
    app_token: Secret<String>,
    secret_key: Secret<String>,
}

impl RequestSigner {
    pub fn new(app_token: Secret<String>, secret_key: Secret<String>) -> Result<Self, SumsubApiError> {
        if app_token.is_blank() {
            return Err(SumsubApiError::Configuration("Cannot sign requests without an app token".into()));
        }
        if secret_key.is_blank() {
            return Err(SumsubApiError::Configuration("Cannot sign requests without a secret key".into()));
        }
        Ok(Self { app_token, secret_key })
    }

    pub fn from_config(config: &SumsubConfig) -> Result<Self, SumsubApiError> {
        Self::new(config.app_token.clone(), config.secret_key.clone())
    }

    /// Signs a request at the given time. This is a pure function of its arguments.
    pub fn sign(&self, method: &Method, path: &str, body: &[u8], timestamp: i64) -> SignedHeaders {
        let signature = calculate_signature(self.secret_key.reveal(), timestamp, method.as_str(), path, body);
        trace!("🔐️ Signed {method} {path} at {timestamp}");
        SignedHeaders { app_token: self.app_token.reveal().clone(), timestamp, signature }
    }

    /// Signs a request using the current wall-clock time.
    pub fn sign_now(&self, method: &Method, path: &str, body: &[u8]) -> SignedHeaders {
        self.sign(method, path, body, Utc::now().timestamp())
    }
}

/// Calculates the Sumsub request signature: hex(HMAC-SHA256(secret, ts || METHOD || path || body)).
pub fn calculate_signature(secret: &str, timestamp: i64, method: &str, path: &str, body: &[u8]) -> String {
    // HMAC accepts keys of any length, so this cannot fail
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap_or_else(|_| unreachable!());
    mac.update(timestamp.to_string().as_bytes());
    mac.update(method.to_uppercase().as_bytes());
    mac.update(path.as_bytes());
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}
