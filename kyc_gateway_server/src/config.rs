use kyc_common::{optional_env, parse_env_or};
use log::*;
use sumsub_tools::SumsubConfig;

use crate::errors::ServerError;

const DEFAULT_KYC_HOST: &str = "127.0.0.1";
const DEFAULT_KYC_PORT: u16 = 8370;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The largest multipart upload, in bytes, that the document route will accept.
    pub max_upload_bytes: usize,
    /// Sumsub credentials. Required; see [`SumsubConfig::try_from_env`].
    pub sumsub: SumsubConfig,
}

impl ServerConfig {
    /// Loads the configuration from the environment. Missing Sumsub credentials are a hard error, so that a
    /// misconfigured gateway fails at startup rather than on its first request.
    pub fn try_from_env() -> Result<Self, ServerError> {
        let sumsub = SumsubConfig::try_from_env().map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
        let host = optional_env("KYC_HOST").unwrap_or_else(|| {
            info!("🪛️ KYC_HOST is not set. Using the default, {DEFAULT_KYC_HOST}.");
            DEFAULT_KYC_HOST.to_string()
        });
        let port = parse_env_or("KYC_PORT", DEFAULT_KYC_PORT)
            .map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
        let max_upload_bytes = parse_env_or("KYC_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)
            .map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
        if max_upload_bytes == 0 {
            return Err(ServerError::ConfigurationError("KYC_MAX_UPLOAD_BYTES must be greater than zero".into()));
        }
        Ok(Self { host, port, max_upload_bytes, sumsub })
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that route handlers need. It deliberately excludes the Sumsub credentials, so
/// that they are only held by the client.
#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    pub max_upload_bytes: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES }
    }
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { max_upload_bytes: config.max_upload_bytes }
    }
}
