//! Helpers for reading configuration from environment variables.
//!
//! Required values produce an [`EnvError`] so that callers can refuse to start. Optional values are logged when they
//! fall back to a default, so that nothing is chosen silently.
use std::{env, env::VarError, fmt::Display, str::FromStr};

use log::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("{0} is not set")]
    Missing(String),
    #[error("{0} is set, but is empty")]
    Empty(String),
    #[error("{name} contains an invalid value. {reason}")]
    Invalid { name: String, reason: String },
}

/// Reads `name` from the environment. Unset, non-unicode and blank values are all errors.
pub fn required_env(name: &str) -> Result<String, EnvError> {
    match env::var(name) {
        Ok(s) if s.trim().is_empty() => Err(EnvError::Empty(name.to_string())),
        Ok(s) => Ok(s),
        Err(VarError::NotPresent) => Err(EnvError::Missing(name.to_string())),
        Err(VarError::NotUnicode(_)) => {
            Err(EnvError::Invalid { name: name.to_string(), reason: "The value is not valid unicode".into() })
        },
    }
}

/// Reads `name` from the environment, treating blank values as unset.
pub fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Parses `name` from the environment, using `default` if it is not set. A value that is set but cannot be parsed is
/// an error rather than a silent fallback.
pub fn parse_env_or<T>(name: &str, default: T) -> Result<T, EnvError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match optional_env(name) {
        Some(s) => s
            .trim()
            .parse::<T>()
            .map_err(|e| EnvError::Invalid { name: name.to_string(), reason: e.to_string() }),
        None => {
            info!("🪛️ {name} is not set. Using the default value of {default}.");
            Ok(default)
        },
    }
}
