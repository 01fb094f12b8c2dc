//! Mesh interpolation for the insert modelling endpoint.
//!
//! Takes measured (width, length, factor) triples and resamples the
//! factor surface onto a regular width/length grid, so the client can
//! render a contour plot. Synchronous and stateless; this is the
//! simple companion to the asynchronous parameterisation pipeline.

use crate::error::CoreError;

/// Grid spacing along both axes, in the same units as the input data.
const GRID_STEP: f64 = 0.5;

/// Gaussian smoothing radius for the inverse-distance weighting.
const SMOOTHING_SIGMA: f64 = 1.0;

/// Grid nodes further than this from every measurement have no
/// support and are omitted from the mesh.
const SUPPORT_RADIUS: f64 = 2.0;

/// Validate measured (width, length, factor) triples.
///
/// Rules:
/// - All three lists must have the same length.
/// - At least one measurement.
/// - Every value must be a finite number.
pub fn validate_measurements(width: &[f64], length: &[f64], factor: &[f64]) -> Result<(), CoreError> {
    if width.len() != length.len() || width.len() != factor.len() {
        return Err(CoreError::Validation(
            "width, length and factor must have the same length".to_string(),
        ));
    }
    if width.is_empty() {
        return Err(CoreError::Validation(
            "at least one measurement is required".to_string(),
        ));
    }
    if width
        .iter()
        .chain(length)
        .chain(factor)
        .any(|v| !v.is_finite())
    {
        return Err(CoreError::Validation(
            "measurements must be finite numbers".to_string(),
        ));
    }
    Ok(())
}

/// Resample measured insert factors onto a regular mesh.
///
/// Returns flattened, parallel `(mesh_width, mesh_length, mesh_factor)`
/// lists. The grid spans the data's extent at [`GRID_STEP`] spacing;
/// each supported node's factor is the Gaussian-weighted average of the
/// measurements. Widths and lengths are rounded to 1 decimal, factors
/// to 4, matching the endpoint contract.
pub fn create_transformed_mesh(
    width: &[f64],
    length: &[f64],
    factor: &[f64],
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut mesh_width = Vec::new();
    let mut mesh_length = Vec::new();
    let mut mesh_factor = Vec::new();

    for w in grid_axis(width) {
        for l in grid_axis(length) {
            if let Some(value) = interpolate(width, length, factor, w, l) {
                mesh_width.push(round_decimals(w, 1));
                mesh_length.push(round_decimals(l, 1));
                mesh_factor.push(round_decimals(value, 4));
            }
        }
    }

    (mesh_width, mesh_length, mesh_factor)
}

/// Regular axis covering the data extent, aligned to multiples of
/// [`GRID_STEP`] so identical data always yields identical grids.
fn grid_axis(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let first = (min / GRID_STEP).floor() as i64;
    let last = (max / GRID_STEP).ceil() as i64;
    (first..=last).map(|i| i as f64 * GRID_STEP).collect()
}

/// Gaussian-weighted average of the measured factors at `(w, l)`, or
/// `None` when every measurement lies outside the support radius.
fn interpolate(width: &[f64], length: &[f64], factor: &[f64], w: f64, l: f64) -> Option<f64> {
    let mut weight_sum = 0.0;
    let mut value_sum = 0.0;
    let mut supported = false;

    for i in 0..width.len() {
        let dw = width[i] - w;
        let dl = length[i] - l;
        let dist_sq = dw * dw + dl * dl;
        if dist_sq <= SUPPORT_RADIUS * SUPPORT_RADIUS {
            supported = true;
        }
        let weight = (-dist_sq / (2.0 * SMOOTHING_SIGMA * SMOOTHING_SIGMA)).exp();
        weight_sum += weight;
        value_sum += weight * factor[i];
    }

    if supported && weight_sum > 0.0 {
        Some(value_sum / weight_sum)
    } else {
        None
    }
}

fn round_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10_f64.powi(decimals as i32);
    (value * scale).round() / scale
}
