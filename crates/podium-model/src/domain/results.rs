use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metric name to value mapping reported by a submission.
///
/// The key set is open-ended; which metric ranks a task is decided at
/// ranking time, not here. Values are always finite once validated.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Results(BTreeMap<String, f64>);

impl Results {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Insert or overwrite a metric.
    ///
    /// Returns `self` for chaining.
    pub fn insert(&mut self, metric: impl Into<String>, value: f64) -> &mut Self {
        self.0.insert(metric.into(), value);
        self
    }

    /// Value of `metric`, if reported.
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).copied()
    }

    /// Iterate metrics in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Metric names in name order.
    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Results {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
