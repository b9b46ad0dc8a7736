//! Configuration
//!
//! Environment-driven settings for the service clients. The wizard core is
//! configuration-free; only the HTTP layer needs to know where the
//! registration service lives.

use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the registration service base URL.
pub const API_URL_VAR: &str = "SIGNUP_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{API_URL_VAR} not set")]
    MissingApiUrl,
}

/// Settings for the HTTP clients.
#[derive(Debug, Clone)]
pub struct SignupConfig {
    /// Base URL of the registration service, without a trailing slash.
    pub api_base_url: String,
    /// Per-request timeout applied by the reqwest clients.
    pub request_timeout: Duration,
}

impl SignupConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var(API_URL_VAR).map_err(|_| ConfigError::MissingApiUrl)?;
        Ok(Self::new(api_base_url))
    }
}
