//! Spoken response text
//!
//! Every function here returns a non-empty sentence suitable for speech
//! synthesis.

use crate::orchestrator::RunStats;

/// Reply when a new run could not be started
pub const RUN_FAILED: &str =
    "I encountered an issue starting the tests. Please check the dashboard.";

/// Reply when there are no runs yet
pub const NO_RUNS: &str = "No test runs found yet. Would you like me to run some tests?";

/// Reply when the latest run applied no patches
pub const NO_BUGS: &str = "Good news! No bugs found in the latest run.";

/// Canned explanation of the most recent fix
pub const EXPLAIN_FIX: &str = "The last fix I applied was adding a null check to the onClick handler. The button was trying to call a function that didn't exist when the user clicked before the page fully loaded.";

/// Help text for utterances that match no command
pub const HELP: &str = "I can run tests, show bugs, explain fixes, or give you a status update. What would you like?";

/// Reply when the orchestrator cannot be reached while listing bugs
pub const BUGS_UNREACHABLE: &str =
    "Sorry, I couldn't reach the orchestrator to check for bugs. Please check the dashboard.";

/// Reply when the orchestrator cannot be reached for a status update
pub const STATUS_UNREACHABLE: &str =
    "Sorry, I couldn't reach the orchestrator for a status update. Please check that it's running.";

/// Placeholder when the orchestrator acknowledges a run without an id
pub const UNKNOWN_RUN_ID: &str = "unknown";

/// First `len` characters of a run id
pub fn run_id_prefix(run_id: &str, len: usize) -> &str {
    match run_id.char_indices().nth(len) {
        Some((end, _)) => &run_id[..end],
        None => run_id,
    }
}

/// Confirmation that a run has started
pub fn run_started(run_id_prefix: &str) -> String {
    format!(
        "Starting test run. I'll analyze your application and fix any bugs I find. Run ID is {}.",
        run_id_prefix
    )
}

/// Report of bugs fixed in the latest run
pub fn bugs_found(patches_applied: u64) -> String {
    if patches_applied == 0 {
        NO_BUGS.to_string()
    } else {
        format!(
            "I found {} bugs in the latest run and applied fixes for all of them.",
            patches_applied
        )
    }
}

/// One-sentence summary of aggregate run stats
pub fn status_summary(stats: &RunStats) -> String {
    format!(
        "I've run {} test sessions with a {:.0}% pass rate. I've applied {} fixes total.",
        stats.total_runs, stats.pass_rate, stats.patches_applied
    )
}
