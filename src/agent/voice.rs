//! Voice command agent
//!
//! Classifies an utterance, serves the matching intent against the
//! orchestrator and phrases the result for speech. Orchestrator failures are
//! logged and turned into a degraded reply; they never reach the caller.

use crate::agent::responses;
use crate::integration::AgentConfig;
use crate::intent::{classify, Intent};
use crate::orchestrator::{OrchestratorClient, RunListResponse, RunRequest};
use crate::{QAgentError, Result};
use tracing::{debug, info, warn};

/// Stateless command agent; each call is independent
#[derive(Clone, Debug)]
pub struct VoiceAgent {
    client: OrchestratorClient,
    run_request: RunRequest,
    run_id_display_len: usize,
}

impl VoiceAgent {
    /// Create an agent for the configured orchestrator
    pub fn new(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            client: OrchestratorClient::new(config)?,
            run_request: RunRequest::canned(config.repo_name.clone(), config.max_iterations),
            run_id_display_len: config.run_id_display_len,
        })
    }

    /// Answer one finalized utterance
    pub async fn handle_command(&self, utterance: &str) -> String {
        let intent = classify(utterance);
        debug!("Classified '{}' as {}", utterance, intent);
        self.dispatch(intent).await
    }

    /// Serve an already classified intent
    pub async fn dispatch(&self, intent: Intent) -> String {
        match intent {
            Intent::RunTests => self.run_tests().await,
            Intent::ListBugs => self.list_bugs().await,
            Intent::ExplainFix => self.explain_fix(),
            Intent::Status => self.status().await,
            Intent::Unknown => responses::HELP.to_string(),
        }
    }

    /// Start a run with the canned request and read back its id prefix
    ///
    /// Not idempotent: every call starts a new run.
    pub async fn run_tests(&self) -> String {
        match self.client.create_run(&self.run_request).await {
            Ok(created) => {
                let run_id = created
                    .run
                    .id
                    .unwrap_or_else(|| responses::UNKNOWN_RUN_ID.to_string());
                info!("Started test run {}", run_id);
                let prefix = responses::run_id_prefix(&run_id, self.run_id_display_len);
                responses::run_started(prefix)
            }
            Err(e) => {
                warn!("Failed to start test run: {}", e);
                responses::RUN_FAILED.to_string()
            }
        }
    }

    /// Report the patch count of the most recent run
    pub async fn list_bugs(&self) -> String {
        match self.fetch_runs().await {
            Ok(list) => match list.latest() {
                None => responses::NO_RUNS.to_string(),
                Some(latest) => responses::bugs_found(latest.patches_applied),
            },
            Err(e) => {
                warn!("Failed to list bugs: {}", e);
                responses::BUGS_UNREACHABLE.to_string()
            }
        }
    }

    /// Explain the last fix
    ///
    /// Static text; the orchestrator exposes no fix history.
    pub fn explain_fix(&self) -> String {
        responses::EXPLAIN_FIX.to_string()
    }

    /// Summarize aggregate run stats
    pub async fn status(&self) -> String {
        match self.fetch_runs().await {
            Ok(list) => responses::status_summary(&list.stats),
            Err(e) => {
                warn!("Failed to fetch status: {}", e);
                responses::STATUS_UNREACHABLE.to_string()
            }
        }
    }

    /// Fetch the run list, reading protocol and decode failures as empty data
    ///
    /// Only transport failures are returned as errors.
    async fn fetch_runs(&self) -> Result<RunListResponse> {
        match self.client.list_runs().await {
            Ok(list) => Ok(list),
            Err(e @ (QAgentError::Protocol { .. } | QAgentError::Decode(_))) => {
                warn!("Treating run list as empty: {}", e);
                Ok(RunListResponse::default())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn agent_for(server: &MockServer) -> VoiceAgent {
        VoiceAgent::new(&AgentConfig::new(server.uri())).unwrap()
    }

    async fn mount_runs(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/api/runs"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_run_tests_truncates_id() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/runs"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "run": { "id": "abcdef1234567890" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let reply = agent_for(&server).dispatch(Intent::RunTests).await;
        assert!(reply.contains("abcdef12"));
        assert!(!reply.contains("abcdef123"));
    }

    #[tokio::test]
    async fn test_run_tests_missing_id() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/runs"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .mount(&server)
            .await;

        let reply = agent_for(&server).run_tests().await;
        assert!(reply.ends_with("Run ID is unknown."));
    }

    #[tokio::test]
    async fn test_run_tests_server_error() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/runs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let reply = agent_for(&server).dispatch(Intent::RunTests).await;
        assert_eq!(reply, responses::RUN_FAILED);
    }

    #[tokio::test]
    async fn test_list_bugs_variants() {
        let server = MockServer::start().await;
        mount_runs(&server, 200, json!({ "runs": [] })).await;
        assert_eq!(
            agent_for(&server).dispatch(Intent::ListBugs).await,
            responses::NO_RUNS
        );

        let server = MockServer::start().await;
        mount_runs(&server, 200, json!({ "runs": [{ "patchesApplied": 0 }] })).await;
        assert_eq!(
            agent_for(&server).dispatch(Intent::ListBugs).await,
            responses::NO_BUGS
        );

        let server = MockServer::start().await;
        mount_runs(
            &server,
            200,
            json!({ "runs": [{ "patchesApplied": 3 }, { "patchesApplied": 9 }] }),
        )
        .await;
        let reply = agent_for(&server).dispatch(Intent::ListBugs).await;
        assert!(reply.contains('3'));
        assert!(!reply.contains('9'));
    }

    #[tokio::test]
    async fn test_float_counts_are_spoken() {
        let server = MockServer::start().await;
        mount_runs(
            &server,
            200,
            json!({
                "runs": [{ "patchesApplied": 3.0 }],
                "stats": { "totalRuns": 5.0, "passRate": 80.0, "patchesApplied": 7.0 }
            }),
        )
        .await;

        let agent = agent_for(&server);
        assert_eq!(
            agent.list_bugs().await,
            "I found 3 bugs in the latest run and applied fixes for all of them."
        );
        assert_eq!(
            agent.status().await,
            "I've run 5 test sessions with a 80% pass rate. I've applied 7 fixes total."
        );
    }

    #[tokio::test]
    async fn test_list_bugs_ignores_garbage_in_older_runs() {
        let server = MockServer::start().await;
        mount_runs(
            &server,
            200,
            json!({ "runs": [{ "patchesApplied": 3 }, { "patchesApplied": "x", "id": 5 }, 7] }),
        )
        .await;

        let reply = agent_for(&server).list_bugs().await;
        assert_eq!(
            reply,
            "I found 3 bugs in the latest run and applied fixes for all of them."
        );
    }

    #[tokio::test]
    async fn test_list_bugs_server_error_reads_as_empty() {
        let server = MockServer::start().await;
        mount_runs(&server, 500, json!({ "error": "boom" })).await;

        let reply = agent_for(&server).list_bugs().await;
        assert_eq!(reply, responses::NO_RUNS);
    }

    #[tokio::test]
    async fn test_status_summary() {
        let server = MockServer::start().await;
        mount_runs(
            &server,
            200,
            json!({ "stats": { "totalRuns": 5, "passRate": 80, "patchesApplied": 7 } }),
        )
        .await;

        let reply = agent_for(&server).dispatch(Intent::Status).await;
        assert!(reply.contains('5'));
        assert!(reply.contains("80"));
        assert!(reply.contains('7'));
    }

    #[tokio::test]
    async fn test_status_malformed_body_uses_defaults() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/api/runs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let reply = agent_for(&server).status().await;
        assert_eq!(
            reply,
            "I've run 0 test sessions with a 0% pass rate. I've applied 0 fixes total."
        );
    }

    #[tokio::test]
    async fn test_static_intents_make_no_requests() {
        let server = MockServer::start().await;
        Mock::given(matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let agent = agent_for(&server);
        assert_eq!(agent.dispatch(Intent::ExplainFix).await, responses::EXPLAIN_FIX);
        assert_eq!(agent.dispatch(Intent::Unknown).await, responses::HELP);
    }
}
