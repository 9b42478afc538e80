mod submission;
pub use submission::{NewSubmission, Submission, format_timestamp};
