//! Synchronous mesh-modelling endpoint.
//!
//! Unlike `/parameterise`, this transform is cheap: it resamples
//! measured insert factors onto a regular grid in-request.

use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use einsert_core::mesh::{create_transformed_mesh, validate_measurements};

use crate::error::AppResult;

/// Measured (width, length, factor) triples, as parallel lists.
#[derive(Debug, Deserialize)]
pub struct ModelRequest {
    pub width: Vec<f64>,
    pub length: Vec<f64>,
    pub factor: Vec<f64>,
}

/// Flattened mesh, parallel lists again.
#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub mesh_width: Vec<f64>,
    pub mesh_length: Vec<f64>,
    pub mesh_factor: Vec<f64>,
}

/// POST /model — interpolate measured factors onto a mesh.
pub async fn model(Json(body): Json<ModelRequest>) -> AppResult<impl IntoResponse> {
    validate_measurements(&body.width, &body.length, &body.factor)?;

    let (mesh_width, mesh_length, mesh_factor) =
        create_transformed_mesh(&body.width, &body.length, &body.factor);

    Ok(Json(ModelResponse {
        mesh_width,
        mesh_length,
        mesh_factor,
    }))
}
