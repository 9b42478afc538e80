use serde::Serialize;
use time::{OffsetDateTime, macros::format_description};

use crate::domain::{Results, TaskKey};

/// Validated submission that has not been stored yet.
///
/// Produced by [`crate::SubmitRequest::validate`]; the store turns it into a
/// [`Submission`] by assigning a sequence number and a timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct NewSubmission {
    pub name: String,
    pub host: String,
    pub task: TaskKey,
    pub results: Results,
}

/// Scored entry held by the store.
///
/// Immutable once created: all fields are private and only exposed by reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Submission {
    seq: u64,
    name: String,
    host: String,
    task: TaskKey,
    results: Results,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
}

impl Submission {
    /// Stamp a validated submission with its store sequence number and creation time.
    pub fn accept(new: NewSubmission, seq: u64, timestamp: OffsetDateTime) -> Self {
        Self {
            seq,
            name: new.name,
            host: new.host,
            task: new.task,
            results: new.results,
            timestamp,
        }
    }

    /// Store-wide append position; strictly increasing in insertion order.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn task(&self) -> &TaskKey {
        &self.task
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Value of the given ranking metric, if this submission reported it.
    pub fn score(&self, metric: &str) -> Option<f64> {
        self.results.get(metric)
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` in its own offset.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn new_sub() -> NewSubmission {
        NewSubmission {
            name: "team-a".into(),
            host: "gpu-01".into(),
            task: TaskKey::from("seg"),
            results: [("F1", 0.8)].into_iter().collect(),
        }
    }

    #[test]
    fn accept_keeps_fields_and_stamps() {
        let at = datetime!(2025-01-02 03:04:05 UTC);
        let sub = Submission::accept(new_sub(), 7, at);

        assert_eq!(sub.seq(), 7);
        assert_eq!(sub.name(), "team-a");
        assert_eq!(sub.host(), "gpu-01");
        assert_eq!(sub.task().as_str(), "seg");
        assert_eq!(sub.timestamp(), at);
        assert_eq!(sub.score("F1"), Some(0.8));
        assert_eq!(sub.score("AP"), None);
    }

    #[test]
    fn display_format_has_no_offset() {
        let at = datetime!(2025-01-02 03:04:05 UTC);
        assert_eq!(format_timestamp(at), "2025-01-02 03:04:05");
    }

    #[test]
    fn serializes_timestamp_as_rfc3339() {
        let at = datetime!(2025-01-02 03:04:05 UTC);
        let json = serde_json::to_value(Submission::accept(new_sub(), 1, at)).unwrap();

        assert_eq!(json["timestamp"], "2025-01-02T03:04:05Z");
        assert_eq!(json["task"], "seg");
        assert_eq!(json["results"]["F1"], 0.8);
    }
}
