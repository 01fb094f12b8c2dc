//! Route definition for the mesh-modelling endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::model;
use crate::state::AppState;

/// ```text
/// POST /model -> model (synchronous mesh interpolation)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/model", post(model::model))
}
