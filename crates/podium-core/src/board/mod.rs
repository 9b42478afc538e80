//! View-model assembly for the leaderboard.
//!
//! [`render_tasks`] is a pure function of the submissions and the metric
//! table: it never reads the clock and never touches the store. Presentation
//! layers turn the resulting [`Leaderboard`] into markup or JSON.
use std::collections::BTreeMap;

use serde::Serialize;

use podium_model::{Submission, TaskKey};

use crate::ranking::{MetricTable, format_score, rank_task};

/// One ranked row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// 1-based position within its task's list.
    pub rank: usize,
    /// Raw value of the task's ranking metric.
    pub score: f64,
    pub submission: Submission,
}

impl RankedEntry {
    pub fn display_score(&self) -> String {
        format_score(self.score)
    }
}

/// Ranked view of a single task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBoard {
    pub task: TaskKey,
    /// Ranking metric used for this task.
    pub metric: String,
    /// Metric columns to display: the ranking metric first, then every other
    /// reported metric in name order.
    pub columns: Vec<String>,
    pub podium: Vec<RankedEntry>,
    pub full_log: Vec<RankedEntry>,
    pub unrankable: usize,
    /// Every submission of the task, rankable or not.
    pub total: usize,
}

/// Ranked view of every task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    /// Tasks ordered by key.
    pub tasks: Vec<TaskBoard>,
    /// Rankable entries of all tasks, most recent first.
    pub complete_log: Vec<RankedEntry>,
    /// Sum of unrankable submissions over all tasks.
    pub unrankable: usize,
}

impl Leaderboard {
    /// `true` when there is nothing to show at all.
    pub fn is_empty(&self) -> bool {
        self.tasks.iter().all(|t| t.total == 0)
    }
}

/// Rank every task and assemble the leaderboard.
pub fn render_tasks(
    tasks: &BTreeMap<TaskKey, Vec<Submission>>,
    metrics: &MetricTable,
) -> Leaderboard {
    let boards: Vec<TaskBoard> = tasks
        .iter()
        .map(|(task, subs)| render_task(task, subs, metrics.metric_for(task)))
        .collect();

    let mut complete_log: Vec<RankedEntry> = boards
        .iter()
        .flat_map(|b| b.full_log.iter().cloned())
        .collect();
    complete_log.sort_by(|a, b| {
        b.submission
            .timestamp()
            .cmp(&a.submission.timestamp())
            .then_with(|| b.submission.seq().cmp(&a.submission.seq()))
    });

    let unrankable = boards.iter().map(|b| b.unrankable).sum();

    Leaderboard {
        tasks: boards,
        complete_log,
        unrankable,
    }
}

fn render_task(task: &TaskKey, subs: &[Submission], metric: &str) -> TaskBoard {
    let ranked = rank_task(subs, metric);

    let entries = |list: Vec<Submission>| -> Vec<RankedEntry> {
        list.into_iter()
            .enumerate()
            .filter_map(|(i, s)| {
                s.score(metric).map(|score| RankedEntry {
                    rank: i + 1,
                    score,
                    submission: s,
                })
            })
            .collect()
    };

    let mut columns = vec![metric.to_string()];
    let mut others: Vec<&str> = subs
        .iter()
        .flat_map(|s| s.results().metrics())
        .filter(|m| *m != metric)
        .collect();
    others.sort_unstable();
    others.dedup();
    columns.extend(others.into_iter().map(str::to_string));

    TaskBoard {
        task: task.clone(),
        metric: metric.to_string(),
        columns,
        podium: entries(ranked.podium),
        full_log: entries(ranked.full_log),
        unrankable: ranked.unrankable,
        total: subs.len(),
    }
}

#[cfg(test)]
mod tests {
    use podium_model::SubmitRequest;
    use time::{Duration, OffsetDateTime, macros::datetime};

    use super::*;
    use crate::store::SubmissionStore;

    const T0: OffsetDateTime = datetime!(2025-03-01 12:00:00 UTC);

    fn push(store: &SubmissionStore, name: &str, task: &str, metric: &str, v: f64, secs: i64) {
        store
            .append_at(
                SubmitRequest::new(name, "host")
                    .with_task(task)
                    .with_metric(metric, v),
                T0 + Duration::seconds(secs),
            )
            .unwrap();
    }

    #[test]
    fn tasks_are_listed_in_key_order() {
        let store = SubmissionStore::new();
        push(&store, "a", "seg", "F1", 0.5, 0);
        push(&store, "b", "det", "F1", 0.6, 1);

        let board = render_tasks(&store.snapshot(), &MetricTable::new("F1"));
        let keys: Vec<_> = board.tasks.iter().map(|t| t.task.as_str()).collect();
        assert_eq!(keys, ["det", "seg"]);
    }

    #[test]
    fn each_task_uses_its_own_metric() {
        let store = SubmissionStore::new();
        push(&store, "a", "seg", "F1", 0.5, 0);
        push(&store, "b", "det", "Mean AP", 0.6, 1);

        let metrics = MetricTable::new("F1").with_task("det", "Mean AP");
        let board = render_tasks(&store.snapshot(), &metrics);

        assert_eq!(board.tasks[0].metric, "Mean AP");
        assert_eq!(board.tasks[0].podium[0].score, 0.6);
        assert_eq!(board.tasks[1].metric, "F1");
        assert_eq!(board.unrankable, 0);
    }

    #[test]
    fn podium_and_log_carry_ranks() {
        let store = SubmissionStore::new();
        push(&store, "A", "seg", "F1", 0.8, 0);
        push(&store, "A", "seg", "F1", 0.9, 1);
        push(&store, "B", "seg", "F1", 0.85, 2);

        let board = render_tasks(&store.snapshot(), &MetricTable::new("F1"));
        let seg = &board.tasks[0];

        let podium: Vec<_> = seg
            .podium
            .iter()
            .map(|e| (e.rank, e.submission.name(), e.display_score()))
            .collect();
        assert_eq!(
            podium,
            [(1, "A", "0.900".to_string()), (2, "B", "0.850".to_string())]
        );

        let ranks: Vec<_> = seg.full_log.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn complete_log_is_most_recent_first() {
        let store = SubmissionStore::new();
        push(&store, "a", "seg", "F1", 0.9, 0);
        push(&store, "b", "det", "F1", 0.1, 5);
        push(&store, "c", "seg", "F1", 0.2, 10);
        push(&store, "d", "det", "F1", 0.3, 10);

        let board = render_tasks(&store.snapshot(), &MetricTable::new("F1"));
        let names: Vec<_> = board
            .complete_log
            .iter()
            .map(|e| e.submission.name())
            .collect();
        assert_eq!(names, ["d", "c", "b", "a"]);
    }

    #[test]
    fn unrankable_entries_are_reported() {
        let store = SubmissionStore::new();
        push(&store, "a", "seg", "F1", 0.9, 0);
        push(&store, "b", "seg", "AP", 0.1, 1);

        let board = render_tasks(&store.snapshot(), &MetricTable::new("F1"));
        let seg = &board.tasks[0];

        assert_eq!(seg.unrankable, 1);
        assert_eq!(seg.total, 2);
        assert_eq!(seg.full_log.len(), 1);
        assert_eq!(board.unrankable, 1);
        assert_eq!(seg.columns, ["F1", "AP"]);
        assert!(!board.is_empty());
    }

    #[test]
    fn empty_store_renders_empty_board() {
        let board = render_tasks(&BTreeMap::new(), &MetricTable::default());
        assert!(board.is_empty());
        assert!(board.complete_log.is_empty());
    }

    #[test]
    fn rendering_is_idempotent() {
        let store = SubmissionStore::new();
        push(&store, "a", "seg", "F1", 0.5, 0);
        push(&store, "b", "det", "F1", 0.5, 0);
        push(&store, "c", "det", "F1", 0.7, 3);

        let metrics = MetricTable::new("F1");
        let first = render_tasks(&store.snapshot(), &metrics);
        let second = render_tasks(&store.snapshot(), &metrics);
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_for_json_consumers() {
        let store = SubmissionStore::new();
        push(&store, "a", "seg", "F1", 0.5, 0);

        let board = render_tasks(&store.snapshot(), &MetricTable::new("F1"));
        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(json["tasks"][0]["task"], "seg");
        assert_eq!(json["tasks"][0]["podium"][0]["rank"], 1);
        assert_eq!(json["tasks"][0]["podium"][0]["submission"]["name"], "a");
        assert_eq!(json["unrankable"], 0);
    }
}
