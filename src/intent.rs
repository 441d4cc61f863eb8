//! Intent classification for spoken commands
//!
//! Maps a finalized utterance onto one of the fixed command intents using
//! case-insensitive substring matching. Rules are checked in order and the
//! first rule with a matching phrase wins.

use serde::{Deserialize, Serialize};

/// Phrases that start a new test run
const RUN_TEST_PHRASES: &[&str] = &["run test", "start test", "begin test"];

/// Phrases that ask about bugs found in the latest run
const LIST_BUG_PHRASES: &[&str] = &["what bug", "show bug", "found bug"];

/// Phrases that ask for an explanation of a fix
const EXPLAIN_PHRASES: &[&str] = &["explain", "tell me about"];

/// Phrases that ask for overall agent status
const STATUS_PHRASES: &[&str] = &["status"];

/// Ordered rule table. Earlier rules take precedence.
const RULES: &[(&[&str], Intent)] = &[
    (RUN_TEST_PHRASES, Intent::RunTests),
    (LIST_BUG_PHRASES, Intent::ListBugs),
    (EXPLAIN_PHRASES, Intent::ExplainFix),
    (STATUS_PHRASES, Intent::Status),
];

/// Commands that can be recognized from speech
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Start a new test run
    RunTests,
    /// Report bugs from the most recent run
    ListBugs,
    /// Explain the last applied fix
    ExplainFix,
    /// Summarize overall run statistics
    Status,
    /// Nothing matched
    Unknown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Intent::RunTests => "run_tests",
            Intent::ListBugs => "list_bugs",
            Intent::ExplainFix => "explain_fix",
            Intent::Status => "status",
            Intent::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Classify an utterance into an intent
///
/// Total over all input: anything that matches no rule, including the empty
/// string, is `Intent::Unknown`.
pub fn classify(utterance: &str) -> Intent {
    let normalized = utterance.to_lowercase();

    RULES
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|phrase| normalized.contains(phrase)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Unknown)
}
