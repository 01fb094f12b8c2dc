//! Route definition for the parameterisation polling endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::parameterise;
use crate::state::AppState;

/// ```text
/// POST /parameterise -> parameterise (start or poll a fit job)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/parameterise", post(parameterise::parameterise))
}
