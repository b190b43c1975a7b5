//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BAZAAR_API_URL` - Base URL of the marketplace backend
//!
//! ## Optional
//! - `BAZAAR_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Backend API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend API. Always ends with a slash so endpoint
    /// paths join underneath it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration with the default timeout.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `BAZAAR_API_URL` is missing or not a valid URL,
    /// or if `BAZAAR_HTTP_TIMEOUT_SECS` is set but not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("BAZAAR_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("BAZAAR_API_URL".to_string()))?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("BAZAAR_API_URL".to_string(), e.to_string()))?;

        let timeout = match std::env::var("BAZAAR_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("BAZAAR_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url: with_trailing_slash(base_url),
            timeout,
        })
    }
}

/// Normalize the base URL so `Url::join` keeps its path prefix.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_added() {
        let config = ApiConfig::new(Url::parse("http://localhost:8000/v1").unwrap());
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/v1/");
    }

    #[test]
    fn test_trailing_slash_kept() {
        let config = ApiConfig::new(Url::parse("http://localhost:8000/").unwrap());
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
    }
}
