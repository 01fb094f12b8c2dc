//! Background fit worker.
//!
//! The parameterisation is CPU-bound and can outlive many HTTP
//! request/response cycles, so it runs on the blocking thread pool and
//! streams [`FitEvent`]s over a channel back to an async listener that
//! applies them to the shared job record. Polling handlers read that
//! record concurrently; they never wait on the worker.

use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::events::{self, FitEvent};
use crate::fingerprint::Fingerprint;
use crate::parameterise::parameterise_insert;
use crate::store::SharedFit;

/// Buffer for in-flight progress events; the listener drains promptly,
/// this only absorbs bursts from the search loop.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Spawn the background worker for a freshly created job.
///
/// The returned handle is attached to the job store entry so teardown
/// can reap it. Whatever happens inside the algorithm, the record ends
/// up with `complete = true` as the worker's last write; a job can
/// never be left incomplete forever.
pub fn spawn_fit(
    record: SharedFit,
    key: Fingerprint,
    x: Vec<f64>,
    y: Vec<f64>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run_fit(record, key, x, y, |x, y, report| {
        parameterise_insert(x, y, report)
    }))
}

/// Worker body, generic over the fit algorithm so the lifecycle
/// (event application, completion on panic) is testable without the
/// real search.
async fn run_fit<F>(record: SharedFit, key: Fingerprint, x: Vec<f64>, y: Vec<f64>, fit: F)
where
    F: FnOnce(&[f64], &[f64], &mut dyn FnMut(FitEvent)) + Send + 'static,
{
    tracing::info!(job = %key.short(), points = x.len(), "Fit worker started");

    let (tx, mut rx) = mpsc::channel::<FitEvent>(EVENT_CHANNEL_CAPACITY);
    let (fit_x, fit_y) = (x.clone(), y.clone());
    let fit_task = tokio::task::spawn_blocking(move || {
        // A closed channel means the listener is gone (shutdown); the
        // algorithm just runs out its course without an audience.
        fit(&fit_x, &fit_y, &mut |event| {
            let _ = tx.blocking_send(event);
        });
    });

    // Apply progress as it arrives; the channel closes when the
    // algorithm returns (or panics and drops its sender).
    while let Some(event) = rx.recv().await {
        apply_locked(&record, &event, &x, &y);
    }

    match fit_task.await {
        Ok(()) => tracing::info!(job = %key.short(), "Fit finished"),
        Err(e) => tracing::error!(job = %key.short(), error = %e, "Fit algorithm failed"),
    }

    // Last write: freeze the record with whatever fields landed. The
    // next poll to observe this evicts the job.
    record.lock().expect("job record lock poisoned").complete = true;
}

fn apply_locked(record: &Mutex<crate::record::InsertFit>, event: &FitEvent, x: &[f64], y: &[f64]) {
    let mut fit = record.lock().expect("job record lock poisoned");
    events::apply(&mut fit, event, x, y);
}
