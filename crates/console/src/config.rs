//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKEND_BASE_URL` - Base URL of the Reporta backend
//!   (e.g., `https://reporta.example.org`)
//!
//! ## Optional
//! - `CONSOLE_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds.
//!   When unset, requests rely on the transport's own limits only.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console application configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the backend API.
    pub base_url: Url,
    /// Optional per-request timeout (hardening, not a contract).
    pub request_timeout: Option<Duration>,
}

impl ConsoleConfig {
    /// Build a configuration directly from a base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `BACKEND_BASE_URL` is missing or not a
    /// valid URL, or if `CONSOLE_REQUEST_TIMEOUT_SECS` is set but not
    /// a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("BACKEND_BASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("BACKEND_BASE_URL".to_string()))?;
        let base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("BACKEND_BASE_URL".to_string(), e.to_string()))?;

        let request_timeout = match std::env::var("CONSOLE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "CONSOLE_REQUEST_TIMEOUT_SECS".to_string(),
                        format!("not a number of seconds: {raw}"),
                    )
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            request_timeout,
        })
    }

    /// The base URL with any trailing slash removed, ready for path
    /// concatenation.
    #[must_use]
    pub fn base_url_trimmed(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimming() {
        let config =
            ConsoleConfig::new(Url::parse("https://reporta.example.org/").expect("valid url"));
        assert_eq!(config.base_url_trimmed(), "https://reporta.example.org");
    }

    #[test]
    fn test_new_has_no_timeout() {
        let config =
            ConsoleConfig::new(Url::parse("http://localhost:8000").expect("valid url"));
        assert!(config.request_timeout.is_none());
    }
}
