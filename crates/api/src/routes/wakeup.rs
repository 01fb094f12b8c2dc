use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response payload.
#[derive(Serialize)]
pub struct WakeupResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of parameterisation jobs currently in flight.
    pub jobs: usize,
}

/// GET /wakeup — liveness probe; also nudges sleeping deployments awake.
async fn wakeup(State(state): State<AppState>) -> Json<WakeupResponse> {
    Json(WakeupResponse {
        status: "alive",
        version: env!("CARGO_PKG_VERSION"),
        jobs: state.jobs.job_count(),
    })
}

/// Mount the liveness route (root-level).
pub fn router() -> Router<AppState> {
    Router::new().route("/wakeup", get(wakeup))
}
