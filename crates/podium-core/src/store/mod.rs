//! In-memory, append-only submission store.
//! - Submissions are partitioned by [`TaskKey`] and kept in insertion order.
//! - Writers (`append`, `reset`) and readers share one `RwLock`; readers only
//!   hold it for the duration of a copy.
//! - `reset` is the only deletion path.
use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use time::OffsetDateTime;
use tracing::{debug, instrument, trace};

use podium_model::{Submission, SubmitRequest, TaskKey};

use crate::error::CoreError;

#[derive(Default)]
struct Partitions {
    next_seq: u64,
    tasks: BTreeMap<TaskKey, Vec<Submission>>,
}

/// Process-wide submission store.
///
/// Starts empty. Share it behind an `Arc` with whatever serves requests.
#[derive(Default)]
pub struct SubmissionStore {
    inner: RwLock<Partitions>,
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `req` and append it to its task, stamped with the current time.
    pub fn append(&self, req: SubmitRequest) -> Result<Submission, CoreError> {
        self.append_at(req, OffsetDateTime::now_utc())
    }

    /// Same as [`SubmissionStore::append`] with an explicit creation time.
    ///
    /// Validation happens before the lock is taken; a rejected request leaves the store unchanged.
    #[instrument(level = "debug", skip(self, req), fields(name = %req.name))]
    pub fn append_at(
        &self,
        req: SubmitRequest,
        at: OffsetDateTime,
    ) -> Result<Submission, CoreError> {
        let new = req.validate()?;

        let mut guard = self.write();
        let seq = guard.next_seq;
        guard.next_seq += 1;

        let sub = Submission::accept(new, seq, at);
        guard
            .tasks
            .entry(sub.task().clone())
            .or_default()
            .push(sub.clone());

        trace!(seq, task = %sub.task(), "submission appended");
        Ok(sub)
    }

    /// Copy of the submissions of one task, or of every task when `task` is `None`.
    ///
    /// Per-task insertion order is preserved; across tasks the union is
    /// grouped by task key.
    pub fn list_all(&self, task: Option<&str>) -> Vec<Submission> {
        let guard = self.read();
        match task {
            Some(key) => guard
                .tasks
                .get(&TaskKey::from(key))
                .cloned()
                .unwrap_or_default(),
            None => guard.tasks.values().flatten().cloned().collect(),
        }
    }

    /// Copy of every partition, keyed and ordered by task.
    pub fn snapshot(&self) -> BTreeMap<TaskKey, Vec<Submission>> {
        self.read().tasks.clone()
    }

    /// Clear one task, or every task when `task` is `None`.
    ///
    /// Returns `false` when the named task holds no submissions; that case
    /// is a no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&self, task: Option<&str>) -> bool {
        let mut guard = self.write();
        match task {
            Some(key) => {
                let removed = guard.tasks.remove(&TaskKey::from(key));
                debug!(cleared = removed.as_ref().map_or(0, Vec::len), "task reset");
                removed.is_some()
            }
            None => {
                let cleared: usize = guard.tasks.values().map(Vec::len).sum();
                guard.tasks.clear();
                debug!(cleared, "store reset");
                true
            }
        }
    }

    /// Number of stored submissions across all tasks.
    pub fn len(&self) -> usize {
        self.read().tasks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Partitions> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Partitions> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
