//! Configuration for the voice command agent
//!
//! Provides the orchestrator endpoint and the canned run parameters.

use crate::{QAgentError, Result};
use std::time::Duration;

/// Environment variable holding the orchestrator base URL
pub const ORCHESTRATOR_URL_ENV: &str = "ORCHESTRATOR_URL";

/// Environment variable holding the per-request timeout in milliseconds
pub const REQUEST_TIMEOUT_ENV: &str = "QAGENT_REQUEST_TIMEOUT_MS";

/// Orchestrator used when `ORCHESTRATOR_URL` is unset
pub const DEFAULT_ORCHESTRATOR_URL: &str = "http://localhost:3000";

/// Configuration for the voice command agent
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Base URL of the orchestrator API (no trailing slash)
    pub orchestrator_url: String,

    /// Upper bound on a single orchestrator round trip
    pub request_timeout: Duration,

    /// Repository name sent with every run request
    pub repo_name: String,

    /// Iteration cap sent with every run request
    pub max_iterations: u32,

    /// Number of run id characters read back to the user
    pub run_id_display_len: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            orchestrator_url: DEFAULT_ORCHESTRATOR_URL.to_string(),
            request_timeout: Duration::from_secs(5),
            repo_name: "Demo App".to_string(),
            max_iterations: 5,
            run_id_display_len: 8,
        }
    }
}

impl AgentConfig {
    /// Create a configuration pointing at the given orchestrator
    pub fn new(orchestrator_url: impl Into<String>) -> Self {
        Self::default().with_orchestrator_url(orchestrator_url)
    }

    /// Build a configuration from the process environment
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ORCHESTRATOR_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_orchestrator_url(url.trim());
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                QAgentError::ConfigError(format!(
                    "{} must be a whole number of milliseconds, got {:?}",
                    REQUEST_TIMEOUT_ENV, raw
                ))
            })?;
            config = config.with_request_timeout(Duration::from_millis(millis));
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the orchestrator base URL
    pub fn with_orchestrator_url(mut self, url: impl Into<String>) -> Self {
        self.orchestrator_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the repository name used for new runs
    pub fn with_repo_name(mut self, repo_name: impl Into<String>) -> Self {
        self.repo_name = repo_name.into();
        self
    }

    /// Set the iteration cap used for new runs
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Full URL of the runs collection
    pub fn runs_url(&self) -> String {
        format!("{}/api/runs", self.orchestrator_url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.orchestrator_url.is_empty() {
            return Err(QAgentError::ConfigError(
                "Orchestrator URL is required".to_string(),
            ));
        }

        if !(self.orchestrator_url.starts_with("http://")
            || self.orchestrator_url.starts_with("https://"))
        {
            return Err(QAgentError::ConfigError(format!(
                "Orchestrator URL must use http or https: {}",
                self.orchestrator_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(QAgentError::ConfigError(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(QAgentError::ConfigError(
                "Max iterations must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
