mod results;
pub use results::Results;

mod task;
pub use task::{DEFAULT_TASK, TaskKey};
