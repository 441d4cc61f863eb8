//! Wire types for the orchestrator runs API
//!
//! Response fields are lenient: a missing or mistyped field decodes to its
//! default (zero, empty) instead of failing the whole body.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/runs`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub repo_name: String,
    pub test_specs: Vec<serde_json::Value>,
    pub max_iterations: u32,
}

impl RunRequest {
    /// The canned request issued for every spoken "run tests"
    pub fn canned(repo_name: impl Into<String>, max_iterations: u32) -> Self {
        Self {
            repo_name: repo_name.into(),
            test_specs: Vec::new(),
            max_iterations,
        }
    }
}

/// Body of a successful `POST /api/runs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRunResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub run: CreatedRun,
}

/// The run object echoed back on creation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedRun {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
}

/// Body of `GET /api/runs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunListResponse {
    /// Runs, most recent first
    #[serde(default, deserialize_with = "lenient_each")]
    pub runs: Vec<RunSummary>,

    #[serde(default, deserialize_with = "lenient")]
    pub stats: RunStats,
}

impl RunListResponse {
    /// The most recent run, if any
    pub fn latest(&self) -> Option<&RunSummary> {
        self.runs.first()
    }
}

/// One historical run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_count")]
    pub patches_applied: u64,

    /// Percentage, 0 to 100
    #[serde(default, deserialize_with = "lenient")]
    pub pass_rate: f64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub iterations: u64,
}

/// Aggregate statistics across all runs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_runs: u64,

    /// Percentage, 0 to 100
    #[serde(default, deserialize_with = "lenient")]
    pub pass_rate: f64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub patches_applied: u64,
}

/// Decode a field, substituting the default if its shape is wrong
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a non-negative count, accepting integral floats such as `3.0`
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let count = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    });
    Ok(count.unwrap_or_default())
}

/// Decode a list element by element; a malformed element becomes its default
fn lenient_each<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}
