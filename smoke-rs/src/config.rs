//! Harness configuration
//!
//! The only configuration knob is the API base URL, read from the
//! `BASE_URL` environment variable (or passed through the CLI, which is
//! backed by the same variable).

use crate::{BASE_URL_ENV, DEFAULT_BASE_URL};

/// Resolved harness configuration.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the AgreementHub API, without a trailing slash
    /// (e.g. `http://localhost:3001/api`).
    pub base_url: String,
}

impl HarnessConfig {
    /// Create a configuration from an explicit base URL.
    ///
    /// Trailing slashes are stripped so endpoint paths can always be
    /// appended as `{base}/blueprints`.
    ///
    /// # Example
    ///
    /// ```
    /// use ah_smoke::HarnessConfig;
    ///
    /// let config = HarnessConfig::new("http://localhost:3001/api/");
    /// assert_eq!(config.base_url, "http://localhost:3001/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Create a configuration from the environment, falling back to
    /// [`DEFAULT_BASE_URL`] when `BASE_URL` is unset.
    pub fn from_env() -> Self {
        let base = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
