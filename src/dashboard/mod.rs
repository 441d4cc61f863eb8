//! Dashboard metrics
//!
//! Aggregates per-run records into the numbers shown on the QAgent
//! dashboard: headline metric cards and a first-versus-latest comparison.

use serde::{Deserialize, Serialize};

/// One run as seen by the dashboard, in run order (oldest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// 1-based run number
    pub run: u32,
    /// Fraction of passing tests, 0.0 to 1.0
    pub pass_rate: f64,
    /// Average time to fix, in seconds
    pub fix_time_secs: f64,
    pub iterations: u32,
    pub bugs_fixed: u32,
    pub bugs_found: u32,
    #[serde(default)]
    pub timestamp: String,
}

impl RunRecord {
    fn demo(
        run: u32,
        pass_rate: f64,
        fix_time_secs: f64,
        iterations: u32,
        bugs_found: u32,
        timestamp: &str,
    ) -> Self {
        Self {
            run,
            pass_rate,
            fix_time_secs,
            iterations,
            bugs_fixed: 1,
            bugs_found,
            timestamp: timestamp.to_string(),
        }
    }
}

/// Demo dataset shown when no live data is available
pub fn sample_runs() -> Vec<RunRecord> {
    vec![
        RunRecord::demo(1, 0.33, 180.0, 3, 3, "2024-01-15 10:00"),
        RunRecord::demo(2, 0.50, 150.0, 2, 2, "2024-01-15 10:30"),
        RunRecord::demo(3, 0.67, 120.0, 2, 2, "2024-01-15 11:00"),
        RunRecord::demo(4, 0.83, 90.0, 1, 1, "2024-01-15 11:30"),
        RunRecord::demo(5, 1.00, 60.0, 1, 1, "2024-01-15 12:00"),
    ]
}

/// Headline metric cards
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    /// Latest pass rate as a percentage
    pub pass_rate_pct: f64,
    /// Latest average fix time in seconds
    pub fix_time_secs: f64,
    /// Bugs fixed across all runs
    pub total_bugs_fixed: u64,
    /// Fix time reduction from the first run to the latest, as a percentage
    pub speed_improvement_pct: f64,
}

impl DashboardMetrics {
    /// Compute metrics from runs in run order; `None` when there are no runs
    pub fn compute(runs: &[RunRecord]) -> Option<Self> {
        let first = runs.first()?;
        let latest = runs.last()?;

        let speed_improvement_pct = if first.fix_time_secs > 0.0 {
            (1.0 - latest.fix_time_secs / first.fix_time_secs) * 100.0
        } else {
            0.0
        };

        Some(Self {
            pass_rate_pct: latest.pass_rate * 100.0,
            fix_time_secs: latest.fix_time_secs,
            total_bugs_fixed: runs.iter().map(|r| u64::from(r.bugs_fixed)).sum(),
            speed_improvement_pct,
        })
    }
}

/// One row of the before/after table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub metric: &'static str,
    pub before: String,
    pub after: String,
    pub change: String,
}

/// First-versus-latest comparison; `None` with fewer than two runs
pub fn comparison(runs: &[RunRecord]) -> Option<Vec<ComparisonRow>> {
    if runs.len() < 2 {
        return None;
    }
    let first = runs.first()?;
    let latest = runs.last()?;

    Some(vec![
        ComparisonRow {
            metric: "Pass Rate",
            before: format!("{:.0}%", first.pass_rate * 100.0),
            after: format!("{:.0}%", latest.pass_rate * 100.0),
            change: format!("+{:.0}%", (latest.pass_rate - first.pass_rate) * 100.0),
        },
        ComparisonRow {
            metric: "Fix Time",
            before: format!("{:.0}s", first.fix_time_secs),
            after: format!("{:.0}s", latest.fix_time_secs),
            change: format!("{:.0}s", latest.fix_time_secs - first.fix_time_secs),
        },
        ComparisonRow {
            metric: "Iterations",
            before: first.iterations.to_string(),
            after: latest.iterations.to_string(),
            change: (i64::from(latest.iterations) - i64::from(first.iterations)).to_string(),
        },
    ])
}

/// Plain-text rendering of the metric cards, one per line
pub fn render_summary(metrics: &DashboardMetrics) -> String {
    [
        format!("Pass Rate: {:.0}%", metrics.pass_rate_pct),
        format!("Avg Fix Time: {:.0}s", metrics.fix_time_secs),
        format!("Bugs Fixed: {}", metrics.total_bugs_fixed),
        format!("Speed Improvement: {:.0}%", metrics.speed_improvement_pct),
    ]
    .join("\n")
}
