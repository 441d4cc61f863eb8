//! Orchestrator API access
//!
//! The orchestrator owns run lifecycle, bug detection and patching. This
//! module only speaks its `/api/runs` contract.

mod client;
mod types;

pub use client::OrchestratorClient;
pub use types::{CreateRunResponse, CreatedRun, RunListResponse, RunRequest, RunStats, RunSummary};
