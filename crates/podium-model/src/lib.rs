mod domain;
pub use domain::{DEFAULT_TASK, Results, TaskKey};

mod error;
pub use error::{ModelError, ModelResult};

mod api;
pub use api::SubmitRequest;

mod record;
pub use record::{NewSubmission, Submission, format_timestamp};
