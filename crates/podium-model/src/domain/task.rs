use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of the implicit task used when a submission carries no `task`.
pub const DEFAULT_TASK: &str = "default";

/// Name of a competition category.
///
/// Submissions are ranked independently within each task. Ordering is
/// lexicographic so that boards iterate tasks deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the implicit single-task key.
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_TASK
    }
}

impl Default for TaskKey {
    fn default() -> Self {
        Self(DEFAULT_TASK.to_string())
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for TaskKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
