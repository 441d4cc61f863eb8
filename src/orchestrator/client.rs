//! HTTP client for the orchestrator runs API
//!
//! Each call is a single round trip bounded by the configured timeout. Idle
//! connections are not kept between calls.

use crate::integration::AgentConfig;
use crate::orchestrator::types::{CreateRunResponse, RunListResponse, RunRequest};
use crate::{QAgentError, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Client for `/api/runs`
#[derive(Clone, Debug)]
pub struct OrchestratorClient {
    client: Client,
    runs_url: String,
}

impl OrchestratorClient {
    /// Create a client from the agent configuration
    pub fn new(config: &AgentConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| QAgentError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            runs_url: config.runs_url(),
        })
    }

    /// URL of the runs collection this client talks to
    pub fn runs_url(&self) -> &str {
        &self.runs_url
    }

    /// Start a new run
    ///
    /// Only `201 Created` counts as success; any other status is a
    /// `QAgentError::Protocol`.
    pub async fn create_run(&self, request: &RunRequest) -> Result<CreateRunResponse> {
        debug!(url = %self.runs_url, repo = %request.repo_name, "creating run");

        let response = self
            .client
            .post(&self.runs_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(QAgentError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the run list with aggregate stats
    ///
    /// Any 2xx status is accepted.
    pub async fn list_runs(&self) -> Result<RunListResponse> {
        debug!(url = %self.runs_url, "listing runs");

        let response = self.client.get(&self.runs_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QAgentError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
