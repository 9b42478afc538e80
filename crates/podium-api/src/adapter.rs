use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use podium_core::{
    board::{Leaderboard, render_tasks},
    ranking::MetricTable,
    store::SubmissionStore,
};
use podium_model::{Submission, SubmitRequest};

use crate::{error::ApiError, handler::LeaderboardHandler};

/// [`LeaderboardHandler`] backed directly by a [`SubmissionStore`].
pub struct StoreAdapter {
    store: Arc<SubmissionStore>,
    metrics: MetricTable,
}

impl StoreAdapter {
    pub fn new(store: Arc<SubmissionStore>, metrics: MetricTable) -> Self {
        Self { store, metrics }
    }

    pub fn store(&self) -> &Arc<SubmissionStore> {
        &self.store
    }
}

#[async_trait]
impl LeaderboardHandler for StoreAdapter {
    async fn submit(&self, req: SubmitRequest) -> Result<Submission, ApiError> {
        match self.store.append(req) {
            Ok(sub) => {
                info!(
                    seq = sub.seq(),
                    name = sub.name(),
                    host = sub.host(),
                    task = %sub.task(),
                    "submission accepted"
                );
                Ok(sub)
            }
            Err(e) => {
                warn!(error = %e, "submission rejected");
                Err(e.into())
            }
        }
    }

    async fn reset(&self, task: Option<&str>) -> Result<bool, ApiError> {
        let cleared = self.store.reset(task);
        match task {
            Some(t) if !cleared => debug!(task = t, "reset of unknown task ignored"),
            Some(t) => info!(task = t, "task reset"),
            None => info!("leaderboard reset"),
        }
        Ok(cleared)
    }

    async fn leaderboard(&self) -> Result<Leaderboard, ApiError> {
        let board = render_tasks(&self.store.snapshot(), &self.metrics);
        for task in board.tasks.iter().filter(|t| t.unrankable > 0) {
            warn!(
                task = %task.task,
                metric = %task.metric,
                count = task.unrankable,
                "submissions missing ranking metric"
            );
        }
        debug!(tasks = board.tasks.len(), "leaderboard rendered");
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> StoreAdapter {
        StoreAdapter::new(
            Arc::new(SubmissionStore::new()),
            MetricTable::new("F1").with_task("det", "Mean AP"),
        )
    }

    #[tokio::test]
    async fn submit_then_render() {
        let api = adapter();
        api.submit(SubmitRequest::new("A", "h").with_metric("F1", 0.5))
            .await
            .unwrap();
        api.submit(
            SubmitRequest::new("B", "h")
                .with_task("det")
                .with_metric("Mean AP", 0.7),
        )
        .await
        .unwrap();

        let board = api.leaderboard().await.unwrap();
        assert_eq!(board.tasks.len(), 2);
        assert_eq!(board.tasks[0].task.as_str(), "default");
        assert_eq!(board.tasks[1].metric, "Mean AP");
        assert_eq!(board.tasks[1].podium[0].score, 0.7);
    }

    #[tokio::test]
    async fn invalid_submission_maps_to_validation_error() {
        let api = adapter();
        let err = api.submit(SubmitRequest::new("A", "h")).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(api.store().is_empty());
    }

    #[tokio::test]
    async fn reset_reports_whether_anything_was_cleared() {
        let api = adapter();
        api.submit(SubmitRequest::new("A", "h").with_task("seg").with_metric("F1", 0.5))
            .await
            .unwrap();

        assert!(!api.reset(Some("nonexistent-task")).await.unwrap());
        assert_eq!(api.store().len(), 1);
        assert!(api.reset(Some("seg")).await.unwrap());
        assert!(api.store().is_empty());
    }
}
