use std::time::Duration;

use kyc_common::{optional_env, required_env, Secret};
use log::*;
use url::Url;

use crate::SumsubApiError;

pub const DEFAULT_LEVEL_NAME: &str = "basic-kyc-level";
pub const DEFAULT_DOCUMENT_COUNTRY: &str = "NGA";

/// Credentials and knobs for talking to Sumsub. Loaded once at startup and never modified afterwards.
#[derive(Debug, Clone)]
pub struct SumsubConfig {
    pub app_token: Secret<String>,
    pub secret_key: Secret<String>,
    /// e.g. "https://api.sumsub.com". Any trailing slash is ignored.
    pub base_url: Url,
    /// The verification level new applicants are created on.
    pub level_name: String,
    /// ISO 3166-1 alpha-3 country used for id documents when the caller does not supply one.
    pub document_country: String,
    /// Per-request timeout for outbound calls. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl SumsubConfig {
    pub fn new(app_token: &str, secret_key: &str, base_url: &str) -> Result<Self, SumsubApiError> {
        let config = Self {
            app_token: Secret::from(app_token),
            secret_key: Secret::from(secret_key),
            base_url: parse_base_url(base_url)?,
            level_name: DEFAULT_LEVEL_NAME.to_string(),
            document_country: DEFAULT_DOCUMENT_COUNTRY.to_string(),
            timeout: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration from `SUMSUB_*` environment variables. The token, secret and base URL are required;
    /// this fails if any of them are missing so that the server never starts half-configured.
    pub fn try_from_env() -> Result<Self, SumsubApiError> {
        let app_token = required_env("SUMSUB_APP_TOKEN")?;
        let secret_key = required_env("SUMSUB_SECRET_KEY")?;
        let base_url = required_env("SUMSUB_TEST_BASE_URL")?;
        let mut config = Self::new(&app_token, &secret_key, &base_url)?;
        config.level_name = optional_env("SUMSUB_LEVEL_NAME").unwrap_or_else(|| {
            info!("🪛️ SUMSUB_LEVEL_NAME is not set. New applicants will be created on '{DEFAULT_LEVEL_NAME}'.");
            DEFAULT_LEVEL_NAME.to_string()
        });
        config.document_country = optional_env("SUMSUB_DOCUMENT_COUNTRY").unwrap_or_else(|| {
            info!("🪛️ SUMSUB_DOCUMENT_COUNTRY is not set. Using '{DEFAULT_DOCUMENT_COUNTRY}' for id documents.");
            DEFAULT_DOCUMENT_COUNTRY.to_string()
        });
        config.timeout = match optional_env("SUMSUB_TIMEOUT_SECS") {
            Some(s) => {
                let secs = s.trim().parse::<u64>().map_err(|e| {
                    SumsubApiError::Configuration(format!("SUMSUB_TIMEOUT_SECS must be a whole number of seconds. {e}"))
                })?;
                Some(Duration::from_secs(secs))
            },
            None => {
                info!("🪛️ SUMSUB_TIMEOUT_SECS is not set. Outbound Sumsub calls will not time out.");
                None
            },
        };
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_level_name(mut self, level_name: &str) -> Self {
        self.level_name = level_name.to_string();
        self
    }

    fn validate(&self) -> Result<(), SumsubApiError> {
        if self.app_token.is_blank() {
            return Err(SumsubApiError::Configuration("The Sumsub app token is empty".into()));
        }
        if self.secret_key.is_blank() {
            return Err(SumsubApiError::Configuration("The Sumsub secret key is empty".into()));
        }
        Ok(())
    }
}

fn parse_base_url(s: &str) -> Result<Url, SumsubApiError> {
    let url = Url::parse(s.trim().trim_end_matches('/'))
        .map_err(|e| SumsubApiError::Configuration(format!("'{s}' is not a valid base URL. {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SumsubApiError::Configuration(format!("Unsupported scheme '{other}' in base URL '{s}'"))),
    }
}
