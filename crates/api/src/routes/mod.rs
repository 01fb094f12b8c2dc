//! Route definitions, one small router per endpoint area.

pub mod model;
pub mod parameterise;
pub mod wakeup;

use axum::Router;

use crate::state::AppState;

/// All API routes, mounted at the root: clients address
/// `/parameterise` and `/model` without a version prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(parameterise::router())
        .merge(model::router())
}
