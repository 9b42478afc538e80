use thiserror::Error;

/// Reasons a submission is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("missing or empty field: {0}")]
    MissingField(&'static str),

    #[error("task must not be blank when provided")]
    BlankTask,

    #[error("results must contain at least one metric")]
    EmptyResults,

    #[error("metric name must not be empty")]
    EmptyMetricName,

    #[error("metric '{0}' is not a number")]
    NonNumericMetric(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
