//! Insert parameterisation: circle/ellipse fitting for an electron
//! insert outline.
//!
//! The algorithm is consumed by the rest of the system as a black box
//! that emits [`FitEvent`]s: candidate circle centres while the
//! inscribed-circle search runs, one visual-alignment result, and a
//! final completion event. Identical input always produces the
//! identical event sequence.

use crate::error::CoreError;
use crate::events::FitEvent;

/// Step-halving cutoff for the inscribed-circle search.
const SEARCH_TOLERANCE: f64 = 1e-4;

/// Fewest outline points that still enclose an area.
const MIN_OUTLINE_POINTS: usize = 3;

/// Validate an insert outline before fingerprinting or fitting.
///
/// Rules:
/// - `x` and `y` must have the same length.
/// - At least [`MIN_OUTLINE_POINTS`] points.
/// - Every coordinate must be a finite number.
pub fn validate_outline(x: &[f64], y: &[f64]) -> Result<(), CoreError> {
    if x.len() != y.len() {
        return Err(CoreError::Validation(
            "x and y must have the same length".to_string(),
        ));
    }
    if x.len() < MIN_OUTLINE_POINTS {
        return Err(CoreError::Validation(format!(
            "an insert outline needs at least {MIN_OUTLINE_POINTS} points"
        )));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(CoreError::Validation(
            "coordinates must be finite numbers".to_string(),
        ));
    }
    Ok(())
}

/// Fit an insert outline, reporting progress through `report`.
///
/// Phases, in order:
/// 1. largest-inscribed-circle search (`CircleFound` events, accepted
///    when the candidate improves on the best centre so far);
/// 2. visual alignment (`EllipseFound` with shift and rotation);
/// 3. `Completed` with the final width, length, and circle centre.
pub fn parameterise_insert(x: &[f64], y: &[f64], mut report: impl FnMut(FitEvent)) {
    let centre = find_circle_centre(x, y, &mut report);

    let (x_shift, y_shift, rotation_angle) = visual_alignment(x, y);
    report(FitEvent::EllipseFound {
        x_shift,
        y_shift,
        rotation_angle,
        accepted: true,
    });

    report(FitEvent::Completed {
        width: insert_width(x, y, centre),
        length: insert_length(x, y, centre),
        centre,
    });
}

/// Insert width at a given circle centre: twice the minimum distance
/// from the centre to the outline boundary.
pub fn insert_width(x: &[f64], y: &[f64], centre: (f64, f64)) -> f64 {
    2.0 * distance_to_boundary(x, y, centre)
}

/// Insert length at a given circle centre: twice the maximum distance
/// from the centre to any outline vertex.
pub fn insert_length(x: &[f64], y: &[f64], centre: (f64, f64)) -> f64 {
    let mut max_sq: f64 = 0.0;
    for (&px, &py) in x.iter().zip(y) {
        let dx = px - centre.0;
        let dy = py - centre.1;
        max_sq = max_sq.max(dx * dx + dy * dy);
    }
    2.0 * max_sq.sqrt()
}

/// Largest-inscribed-circle search.
///
/// Shrinking-grid refinement seeded at the vertex centroid: probe the
/// eight neighbours of the current best centre at the current step,
/// move whenever a probe strictly improves the boundary clearance,
/// halve the step when none does. Every strict improvement is reported
/// as an accepted candidate; the best non-improving probe of a stalled
/// sweep is reported as rejected.
fn find_circle_centre(x: &[f64], y: &[f64], report: &mut impl FnMut(FitEvent)) -> (f64, f64) {
    let n = x.len() as f64;
    let mut centre = (
        x.iter().sum::<f64>() / n,
        y.iter().sum::<f64>() / n,
    );
    let mut best = clearance(x, y, centre);
    report(FitEvent::CircleFound {
        centre,
        accepted: best.is_finite(),
    });

    let extent_x = max_of(x) - min_of(x);
    let extent_y = max_of(y) - min_of(y);
    let mut step = extent_x.max(extent_y) / 4.0;

    while step > SEARCH_TOLERANCE {
        let mut improved = false;
        let mut best_rejected: Option<((f64, f64), f64)> = None;

        for dx in [-1.0, 0.0, 1.0] {
            for dy in [-1.0, 0.0, 1.0] {
                if dx == 0.0 && dy == 0.0 {
                    continue;
                }
                let candidate = (centre.0 + dx * step, centre.1 + dy * step);
                let score = clearance(x, y, candidate);
                if score > best {
                    centre = candidate;
                    best = score;
                    improved = true;
                    report(FitEvent::CircleFound {
                        centre,
                        accepted: true,
                    });
                } else if best_rejected.map_or(true, |(_, s)| score > s) {
                    best_rejected = Some((candidate, score));
                }
            }
        }

        if !improved {
            if let Some((candidate, _)) = best_rejected {
                report(FitEvent::CircleFound {
                    centre: candidate,
                    accepted: false,
                });
            }
            step /= 2.0;
        }
    }

    centre
}

/// Boundary clearance of a candidate centre: its distance to the
/// outline if it lies inside the polygon, negative infinity otherwise.
fn clearance(x: &[f64], y: &[f64], point: (f64, f64)) -> f64 {
    if inside_polygon(x, y, point) {
        distance_to_boundary(x, y, point)
    } else {
        f64::NEG_INFINITY
    }
}

/// Visual alignment: centroid placement plus principal-axis rotation
/// from the outline's central second moments.
///
/// The shifts are expressed in the algorithm's transposed display
/// frame (`x_shift` lands on the vertical axis); the geometry
/// projector applies them transposed back, so the rendered ellipse
/// sits on the outline. See the projector for the frame convention.
fn visual_alignment(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let n = x.len() as f64;
    let cx = x.iter().sum::<f64>() / n;
    let cy = y.iter().sum::<f64>() / n;

    let mut mu20 = 0.0;
    let mut mu02 = 0.0;
    let mut mu11 = 0.0;
    for (&px, &py) in x.iter().zip(y) {
        let dx = px - cx;
        let dy = py - cy;
        mu20 += dx * dx;
        mu02 += dy * dy;
        mu11 += dx * dy;
    }

    let rotation_angle = 0.5 * (2.0 * mu11).atan2(mu20 - mu02);
    (cy, cx, rotation_angle)
}

/// Minimum distance from a point to the closed outline.
fn distance_to_boundary(x: &[f64], y: &[f64], point: (f64, f64)) -> f64 {
    let n = x.len();
    let mut min_sq = f64::INFINITY;
    for i in 0..n {
        let j = (i + 1) % n;
        let d = distance_sq_to_segment(point, (x[i], y[i]), (x[j], y[j]));
        min_sq = min_sq.min(d);
    }
    min_sq.sqrt()
}

/// Squared distance from `p` to the segment `a`–`b`.
fn distance_sq_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    };
    let dx = apx - t * abx;
    let dy = apy - t * aby;
    dx * dx + dy * dy
}

/// Ray-casting point-in-polygon test (closed outline, even-odd rule).
fn inside_polygon(x: &[f64], y: &[f64], point: (f64, f64)) -> bool {
    let n = x.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let crosses = (y[i] > point.1) != (y[j] > point.1)
            && point.0 < (x[j] - x[i]) * (point.1 - y[i]) / (y[j] - y[i]) + x[i];
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
