use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{Results, TaskKey},
    error::{ModelError, ModelResult},
    record::NewSubmission,
};

/// Body of `POST /update` as it arrives on the wire.
///
/// Fields are deliberately loose: missing strings default to empty and metric
/// values are kept as raw JSON so that [`SubmitRequest::validate`] can report
/// every malformed input as a [`ModelError`] rather than a decoding failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// Team or participant name.
    #[serde(default)]
    pub name: String,
    /// Originating machine, informational only.
    #[serde(default)]
    pub host: String,
    /// Task key; the implicit task is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Reported metrics.
    #[serde(default)]
    pub results: BTreeMap<String, Value>,
}

impl SubmitRequest {
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn with_metric(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.results.insert(metric.into(), Value::from(value));
        self
    }

    /// Check the request and turn it into a [`NewSubmission`].
    ///
    /// Rules:
    /// - `name` and `host` must be non-blank (surrounding whitespace is trimmed);
    /// - `task`, when present, must be non-blank;
    /// - `results` must hold at least one metric, each a JSON number under a
    ///   non-empty name; `-0.0` is stored as `0.0`.
    pub fn validate(self) -> ModelResult<NewSubmission> {
        let name = non_blank(self.name, "name")?;
        let host = non_blank(self.host, "host")?;

        let task = match self.task {
            None => TaskKey::default(),
            Some(t) if t.trim().is_empty() => return Err(ModelError::BlankTask),
            Some(t) => TaskKey::from(t.trim()),
        };

        if self.results.is_empty() {
            return Err(ModelError::EmptyResults);
        }

        let mut results = Results::new();
        for (metric, raw) in self.results {
            if metric.trim().is_empty() {
                return Err(ModelError::EmptyMetricName);
            }
            let value = raw
                .as_f64()
                .ok_or_else(|| ModelError::NonNumericMetric(metric.clone()))?;
            // JSON numbers are always finite; fold -0.0 into 0.0.
            results.insert(metric, value + 0.0);
        }

        Ok(NewSubmission {
            name,
            host,
            task,
            results,
        })
    }
}

fn non_blank(value: String, field: &'static str) -> ModelResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
