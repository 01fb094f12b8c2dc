use std::sync::Arc;

use einsert_core::store::JobStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-memory store of in-flight parameterisation jobs.
    pub jobs: Arc<JobStore>,
}
