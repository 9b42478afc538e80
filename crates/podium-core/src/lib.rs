pub mod board;
pub mod error;
pub mod ranking;
pub mod store;

pub mod prelude {
    pub use crate::board::{Leaderboard, RankedEntry, TaskBoard, render_tasks};
    pub use crate::error::CoreError;
    pub use crate::ranking::{DEFAULT_METRIC, MetricTable, RankedTask, format_score, rank_task};
    pub use crate::store::SubmissionStore;
}
