//! Geometry projection: job record snapshot → renderable point sequences.
//!
//! Pure and stable; identical snapshots project to identical output,
//! so repeated polls for an unchanged job serialize byte-identically.

use serde::Serialize;

use crate::record::InsertFit;

/// Number of parametric samples over `[0, 2π)` for each figure.
pub const SAMPLE_POINTS: usize = 64;

/// A sampled closed curve, split into coordinate lists the way the
/// client consumes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSeq {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Renderable projection of one snapshot. Absent figures are `None`
/// (serialized as `null`), never empty arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub circle: Option<PointSeq>,
    pub ellipse: Option<PointSeq>,
}

/// Project a snapshot into renderable geometry.
///
/// The circle needs a width and a centre; the ellipse additionally
/// needs a length. Width and length are rounded to 2 decimals, as is
/// every emitted coordinate; the rotation matrix entries are rounded
/// to 4 decimals before any coordinate is computed.
pub fn project(fit: &InsertFit) -> Projection {
    let circle = match (fit.width, fit.circle_centre) {
        (Some(width), Some(centre)) => Some(circle_points(width, centre)),
        _ => None,
    };

    let ellipse = match (fit.width, fit.length, fit.circle_centre) {
        (Some(width), Some(length), Some(_)) => Some(ellipse_points(
            width,
            length,
            fit.rotation_angle,
            fit.x_shift,
            fit.y_shift,
        )),
        _ => None,
    };

    Projection {
        width: fit.width.map(round2),
        length: fit.length.map(round2),
        circle,
        ellipse,
    }
}

fn circle_points(width: f64, centre: (f64, f64)) -> PointSeq {
    let r = width / 2.0;
    let mut seq = PointSeq {
        x: Vec::with_capacity(SAMPLE_POINTS),
        y: Vec::with_capacity(SAMPLE_POINTS),
    };
    for t in samples() {
        seq.x.push(round2(r * t.sin() + centre.0));
        seq.y.push(round2(r * t.cos() + centre.1));
    }
    seq
}

fn ellipse_points(width: f64, length: f64, rotation: f64, x_shift: f64, y_shift: f64) -> PointSeq {
    let a = length / 2.0;
    let b = width / 2.0;
    // 4-decimal trigonometry before 2-decimal coordinate rounding.
    let cos_r = round4(rotation.cos());
    let sin_r = round4(rotation.sin());

    let mut seq = PointSeq {
        x: Vec::with_capacity(SAMPLE_POINTS),
        y: Vec::with_capacity(SAMPLE_POINTS),
    };
    for t in samples() {
        let u = a * t.sin();
        let v = b * t.cos();
        // The shift components are applied transposed relative to
        // their names; this matches the fit algorithm's frame.
        seq.x.push(round2(cos_r * u - sin_r * v + y_shift));
        seq.y.push(round2(sin_r * u + cos_r * v + x_shift));
    }
    seq
}

fn samples() -> impl Iterator<Item = f64> {
    (0..SAMPLE_POINTS).map(|k| 2.0 * std::f64::consts::PI * k as f64 / SAMPLE_POINTS as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_with(width: Option<f64>, length: Option<f64>, centre: Option<(f64, f64)>) -> InsertFit {
        InsertFit {
            width,
            length,
            circle_centre: centre,
            ..InsertFit::default()
        }
    }

    #[test]
    fn empty_snapshot_projects_to_all_none() {
        let projection = project(&InsertFit::default());
        assert!(projection.width.is_none());
        assert!(projection.length.is_none());
        assert!(projection.circle.is_none());
        assert!(projection.ellipse.is_none());
    }

    #[test]
    fn circle_without_length_has_no_ellipse() {
        let projection = project(&fit_with(Some(2.0), None, Some((0.0, 0.0))));
        let circle = projection.circle.expect("circle should be present");
        assert_eq!(circle.x.len(), SAMPLE_POINTS);
        assert_eq!(circle.y.len(), SAMPLE_POINTS);
        assert!(projection.ellipse.is_none());
    }

    #[test]
    fn circle_samples_lie_on_the_radius() {
        let projection = project(&fit_with(Some(2.0), None, Some((1.0, -1.0))));
        let circle = projection.circle.unwrap();
        // t = 0: (sin 0, cos 0) scaled by r=1, centred at (1, -1).
        assert_eq!(circle.x[0], 1.0);
        assert_eq!(circle.y[0], 0.0);
        // Every sample is within rounding error of the radius.
        for (x, y) in circle.x.iter().zip(&circle.y) {
            let r = ((x - 1.0).powi(2) + (y + 1.0).powi(2)).sqrt();
            assert!((r - 1.0).abs() < 0.02, "sample ({x}, {y}) off radius");
        }
    }

    #[test]
    fn width_and_length_round_to_two_decimals() {
        let projection = project(&fit_with(Some(12.345), Some(9.876_5), Some((0.0, 0.0))));
        assert_eq!(projection.width, Some(12.35));
        assert_eq!(projection.length, Some(9.88));
    }

    #[test]
    fn ellipse_shift_is_applied_transposed() {
        let mut fit = fit_with(Some(2.0), Some(2.0), Some((0.0, 0.0)));
        fit.rotation_angle = 0.0;
        fit.x_shift = 10.0;
        fit.y_shift = 20.0;
        let ellipse = project(&fit).ellipse.unwrap();
        // With zero rotation and equal axes, the figure is a unit
        // circle centred at (y_shift, x_shift).
        assert_eq!(ellipse.x[0], 20.0);
        assert_eq!(ellipse.y[0], 11.0);
    }

    #[test]
    fn rotation_uses_four_decimal_trigonometry() {
        let mut fit = fit_with(Some(0.0), Some(200.0), Some((0.0, 0.0)));
        fit.rotation_angle = 0.123_456;
        let ellipse = project(&fit).ellipse.unwrap();
        // Quarter turn sample: u = a·sin(π/2) = 100, v = 0, so
        // x = 100·cos(0.123456) with cos rounded to 4 decimals
        // (0.9924) → 99.24 exactly.
        let quarter = SAMPLE_POINTS / 4;
        assert_eq!(ellipse.x[quarter], 99.24);
        assert_eq!(ellipse.y[quarter], 12.31);
    }

    #[test]
    fn projection_is_idempotent() {
        let mut fit = fit_with(Some(3.21), Some(5.43), Some((1.23, -4.56)));
        fit.rotation_angle = 0.7;
        fit.x_shift = 0.5;
        fit.y_shift = -0.25;

        let a = project(&fit);
        let b = project(&fit);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
