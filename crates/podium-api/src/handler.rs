use async_trait::async_trait;
use podium_core::board::Leaderboard;
use podium_model::{Submission, SubmitRequest};

use crate::error::ApiError;

/// Backend behind the HTTP surface.
///
/// [`crate::StoreAdapter`] serves everything from an in-memory
/// [`podium_core::store::SubmissionStore`]; other implementations can wrap it
/// with extra checks.
#[async_trait]
pub trait LeaderboardHandler: Send + Sync + 'static {
    /// Validate and record a submission.
    async fn submit(&self, req: SubmitRequest) -> Result<Submission, ApiError>;

    /// Clear one task, or all of them when `task` is `None`.
    ///
    /// Returns `false` when the task had nothing to clear.
    async fn reset(&self, task: Option<&str>) -> Result<bool, ApiError>;

    /// Current ranked view of every task.
    async fn leaderboard(&self) -> Result<Leaderboard, ApiError>;
}
