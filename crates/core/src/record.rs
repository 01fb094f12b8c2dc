//! The shared job record for one in-flight insert fit.

use std::f64::consts::FRAC_PI_4;

/// Partial or final results of one background parameterisation.
///
/// Created with all-default values when a job starts, mutated only via
/// [`crate::events::apply`] while `complete` is false, and frozen once
/// `complete` is true. Readers always take a whole-record clone
/// (snapshot) rather than reading fields individually, so a concurrent
/// update can never be observed half-applied.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertFit {
    /// Insert width (diameter of the fitted circle), once known.
    pub width: Option<f64>,
    /// Insert length (major extent through the circle centre), once known.
    pub length: Option<f64>,
    /// Centre of the fitted circle, once known.
    pub circle_centre: Option<(f64, f64)>,
    /// Visual-alignment shift along x.
    pub x_shift: f64,
    /// Visual-alignment shift along y.
    pub y_shift: f64,
    /// Ellipse orientation. Starts at the placeholder −π/4 until the
    /// alignment phase reports a real angle.
    pub rotation_angle: f64,
    /// Set exactly once, as the worker's last write. After this the
    /// record is immutable and the next poll to observe it evicts the job.
    pub complete: bool,
}

impl Default for InsertFit {
    fn default() -> Self {
        Self {
            width: None,
            length: None,
            circle_centre: None,
            x_shift: 0.0,
            y_shift: 0.0,
            rotation_angle: -FRAC_PI_4,
            complete: false,
        }
    }
}
