//! Process-wide job store: at most one live fit per fingerprint.
//!
//! Thread-safe via interior locking; designed to be wrapped in `Arc`
//! and shared between the HTTP handlers and the background workers.
//! Each job record sits behind its own lock so readers copy out whole
//! snapshots and a worker's in-place update can never be observed
//! half-applied.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::fingerprint::Fingerprint;
use crate::record::InsertFit;

/// Shared handle to one job's record.
pub type SharedFit = Arc<Mutex<InsertFit>>;

/// One live job: its shared record plus the worker task driving it.
struct JobEntry {
    record: SharedFit,
    /// Set via [`JobStore::attach_worker`] right after spawning; absent
    /// only in the window between creation and attachment.
    worker: Option<tokio::task::JoinHandle<()>>,
}

/// Map from request fingerprint to in-flight job.
pub struct JobStore {
    jobs: Mutex<HashMap<Fingerprint, JobEntry>>,
}

impl JobStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Look up the job for `key`, creating a fresh all-default record
    /// if none exists.
    ///
    /// Atomic under the store lock: of any number of racing callers,
    /// exactly one observes `created = true` and is responsible for
    /// spawning the worker.
    pub fn get_or_create(&self, key: &Fingerprint) -> (SharedFit, bool) {
        let mut jobs = self.jobs.lock().expect("job store lock poisoned");
        if let Some(entry) = jobs.get(key) {
            return (Arc::clone(&entry.record), false);
        }
        let record = Arc::new(Mutex::new(InsertFit::default()));
        jobs.insert(
            key.clone(),
            JobEntry {
                record: Arc::clone(&record),
                worker: None,
            },
        );
        (record, true)
    }

    /// Record the worker task handle for `key` so teardown can reap it.
    pub fn attach_worker(&self, key: &Fingerprint, handle: tokio::task::JoinHandle<()>) {
        let mut jobs = self.jobs.lock().expect("job store lock poisoned");
        if let Some(entry) = jobs.get_mut(key) {
            entry.worker = Some(handle);
        }
    }

    /// Copy out the current state of the job for `key`, if any.
    ///
    /// The whole record is cloned under its lock, so callers never see
    /// a half-applied update.
    pub fn read_snapshot(&self, key: &Fingerprint) -> Option<InsertFit> {
        let record = {
            let jobs = self.jobs.lock().expect("job store lock poisoned");
            jobs.get(key).map(|entry| Arc::clone(&entry.record))
        };
        record.map(|r| r.lock().expect("job record lock poisoned").clone())
    }

    /// Remove the job for `key`. Idempotent: evicting an absent key is
    /// a no-op, which resolves the benign race of two pollers both
    /// observing the same completed snapshot.
    pub fn evict(&self, key: &Fingerprint) {
        let mut jobs = self.jobs.lock().expect("job store lock poisoned");
        jobs.remove(key);
    }

    /// Number of live jobs, for the liveness endpoint and logs.
    pub fn job_count(&self) -> usize {
        self.jobs.lock().expect("job store lock poisoned").len()
    }

    /// Teardown: abort any still-running workers and clear the map.
    ///
    /// Called after the HTTP server has drained during graceful
    /// shutdown.
    pub fn shutdown(&self) {
        let mut jobs = self.jobs.lock().expect("job store lock poisoned");
        let count = jobs.len();
        for entry in jobs.values() {
            if let Some(handle) = &entry.worker {
                handle.abort();
            }
        }
        jobs.clear();
        tracing::info!(count, "Job store shut down");
    }
}

/// Copy a record out through its shared handle.
///
/// Same whole-record-under-lock discipline as
/// [`JobStore::read_snapshot`], for callers already holding the handle
/// from `get_or_create`.
pub fn snapshot(record: &SharedFit) -> InsertFit {
    record.lock().expect("job record lock poisoned").clone()
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::fingerprint;

    fn key() -> Fingerprint {
        fingerprint(&[0.0, 1.0, 1.0, 0.0], &[0.0, 0.0, 1.0, 1.0])
    }

    #[test]
    fn first_caller_creates_subsequent_callers_reuse() {
        let store = JobStore::new();
        let (_, created) = store.get_or_create(&key());
        assert!(created);
        let (_, created_again) = store.get_or_create(&key());
        assert!(!created_again);
        assert_eq!(store.job_count(), 1);
    }

    #[test]
    fn distinct_keys_get_distinct_jobs() {
        let store = JobStore::new();
        let other = fingerprint(&[9.0], &[9.0]);
        store.get_or_create(&key());
        store.get_or_create(&other);
        assert_eq!(store.job_count(), 2);
    }

    #[test]
    fn snapshot_is_a_detached_copy() {
        let store = JobStore::new();
        let (record, _) = store.get_or_create(&key());

        let before = store.read_snapshot(&key()).unwrap();
        assert!(before.width.is_none());

        record.lock().unwrap().width = Some(3.5);

        // The earlier snapshot is unaffected; a fresh one sees the write.
        assert!(before.width.is_none());
        let after = store.read_snapshot(&key()).unwrap();
        assert_eq!(after.width, Some(3.5));
    }

    #[test]
    fn snapshot_of_absent_key_is_none() {
        let store = JobStore::new();
        assert!(store.read_snapshot(&key()).is_none());
    }

    #[test]
    fn evict_removes_and_is_idempotent() {
        let store = JobStore::new();
        store.get_or_create(&key());
        store.evict(&key());
        assert_eq!(store.job_count(), 0);
        store.evict(&key());
        assert_eq!(store.job_count(), 0);
    }

    #[test]
    fn recreate_after_evict_starts_from_defaults() {
        let store = JobStore::new();
        let (record, _) = store.get_or_create(&key());
        record.lock().unwrap().complete = true;
        store.evict(&key());

        let (_, created) = store.get_or_create(&key());
        assert!(created);
        let snapshot = store.read_snapshot(&key()).unwrap();
        assert!(!snapshot.complete);
        assert!(snapshot.width.is_none());
    }

    #[tokio::test]
    async fn racing_get_or_create_creates_exactly_once() {
        let store = Arc::new(JobStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let (_, created) = store.get_or_create(&key());
                created
            }));
        }
        let mut created_count = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created_count += 1;
            }
        }
        assert_eq!(created_count, 1);
        assert_eq!(store.job_count(), 1);
    }
}
