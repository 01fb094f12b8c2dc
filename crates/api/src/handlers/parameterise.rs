//! The polling handler for insert parameterisation.
//!
//! Every POST either starts a new background fit or reports the
//! current state of the one already running for the same coordinates.
//! The handler never waits on a job: it answers immediately with a
//! snapshot, and the `complete` flag tells the client whether to poll
//! again. The first poll to observe a completed job evicts it.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use einsert_core::fingerprint::fingerprint;
use einsert_core::geometry::{self, Projection};
use einsert_core::parameterise::validate_outline;
use einsert_core::store;
use einsert_core::worker::spawn_fit;

use crate::error::AppResult;
use crate::state::AppState;

/// Insert outline coordinates, as posted by the client.
#[derive(Debug, Deserialize)]
pub struct ParameteriseRequest {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Snapshot response: renderable geometry plus the polling flag.
#[derive(Debug, Serialize)]
pub struct ParameteriseResponse {
    #[serde(flatten)]
    pub projection: Projection,
    pub complete: bool,
}

/// POST /parameterise — start or poll a background fit.
pub async fn parameterise(
    State(state): State<AppState>,
    Json(body): Json<ParameteriseRequest>,
) -> AppResult<impl IntoResponse> {
    // CoreError auto-converts to AppError via #[from].
    validate_outline(&body.x, &body.y)?;

    let key = fingerprint(&body.x, &body.y);
    let (record, created) = state.jobs.get_or_create(&key);

    if created {
        let handle = spawn_fit(record.clone(), key.clone(), body.x, body.y);
        state.jobs.attach_worker(&key, handle);
        tracing::info!(job = %key.short(), "Parameterisation job started");
    }

    let snapshot = store::snapshot(&record);

    // First poll to observe completion retires the job; eviction is
    // idempotent, so a racing second observer is harmless. A later
    // request with the same coordinates starts a fresh job.
    if !created && snapshot.complete {
        state.jobs.evict(&key);
        tracing::info!(job = %key.short(), "Parameterisation job retired");
    }

    Ok(Json(ParameteriseResponse {
        projection: geometry::project(&snapshot),
        complete: snapshot.complete,
    }))
}
