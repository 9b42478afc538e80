//! Ranking of one task's submissions by a chosen metric.
//!
//! Sorting always uses the raw stored value; [`format_score`] only affects display.
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashSet},
};

use serde::{Deserialize, Serialize};

use podium_model::{Submission, TaskKey};

/// Ranking metric used for tasks without an explicit override.
pub const DEFAULT_METRIC: &str = "Instance F1 Score";

/// Number of teams shown on a podium.
pub const PODIUM_SIZE: usize = 3;

/// Which metric ranks which task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTable {
    default: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    overrides: BTreeMap<TaskKey, String>,
}

impl Default for MetricTable {
    fn default() -> Self {
        Self::new(DEFAULT_METRIC)
    }
}

impl MetricTable {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Rank `task` by `metric` instead of the default.
    pub fn with_task(mut self, task: impl Into<TaskKey>, metric: impl Into<String>) -> Self {
        self.overrides.insert(task.into(), metric.into());
        self
    }

    pub fn default_metric(&self) -> &str {
        &self.default
    }

    pub fn metric_for(&self, task: &TaskKey) -> &str {
        self.overrides.get(task).unwrap_or(&self.default)
    }
}

/// Result of [`rank_task`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTask {
    /// Rankable submissions, best first.
    pub full_log: Vec<Submission>,
    /// Best submission of each of the top teams, best first; at most [`PODIUM_SIZE`].
    pub podium: Vec<Submission>,
    /// Submissions that did not report the ranking metric.
    pub unrankable: usize,
}

/// Rank submissions by `metric`.
///
/// - the full log is sorted by score descending; equal scores keep insertion
///   (`seq`) order;
/// - the podium holds each team's maximum-scoring submission (earliest wins a
///   tie) for the top [`PODIUM_SIZE`] teams;
/// - submissions without `metric` are excluded and counted in `unrankable`.
pub fn rank_task(submissions: &[Submission], metric: &str) -> RankedTask {
    let mut ordered: Vec<&Submission> = submissions.iter().collect();
    ordered.sort_by_key(|s| s.seq());

    let mut scored: Vec<(f64, &Submission)> = ordered
        .into_iter()
        .filter_map(|s| s.score(metric).map(|v| (v, s)))
        .collect();
    let unrankable = submissions.len() - scored.len();

    // Stable: ties stay in seq order. Scores are never NaN, and -0.0 == 0.0.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let full_log: Vec<Submission> = scored.into_iter().map(|(_, s)| s.clone()).collect();

    // In a score-descending, seq-ascending log the first row of every team is
    // that team's best, earliest submission.
    let mut seen = HashSet::new();
    let podium = full_log
        .iter()
        .filter(|s| seen.insert(s.name()))
        .take(PODIUM_SIZE)
        .cloned()
        .collect();

    RankedTask {
        full_log,
        podium,
        unrankable,
    }
}

/// Display form of a score: rounded to three decimals.
pub fn format_score(value: f64) -> String {
    format!("{value:.3}")
}
