//! Tagged progress events emitted by the fit algorithm.
//!
//! Rather than letting algorithm callbacks mutate shared state
//! directly, each progress report is an explicit event consumed by a
//! single listener, which keeps the record-update path testable
//! without any channel or thread in the picture.

use crate::parameterise::insert_width;
use crate::record::InsertFit;

/// One progress report from the insert parameteriser.
#[derive(Debug, Clone, PartialEq)]
pub enum FitEvent {
    /// A candidate circle centre from the inscribed-circle search.
    CircleFound { centre: (f64, f64), accepted: bool },
    /// A visual-alignment result (shift and rotation).
    EllipseFound {
        x_shift: f64,
        y_shift: f64,
        rotation_angle: f64,
        accepted: bool,
    },
    /// The algorithm's final answer. Unconditionally overwrites the
    /// circle fields.
    Completed {
        width: f64,
        length: f64,
        centre: (f64, f64),
    },
}

/// Apply one event to a job record.
///
/// `x`/`y` are the job's raw input coordinates: an accepted circle
/// candidate carries only its centre, and the width written alongside
/// it is derived here through the parameteriser's own formula. The
/// length lands only with the final answer, so the rendered ellipse
/// never precedes the alignment phase. Rejected candidates leave the
/// record untouched.
pub fn apply(fit: &mut InsertFit, event: &FitEvent, x: &[f64], y: &[f64]) {
    match event {
        FitEvent::CircleFound { centre, accepted } => {
            if *accepted {
                fit.circle_centre = Some(*centre);
                fit.width = Some(insert_width(x, y, *centre));
            }
        }
        FitEvent::EllipseFound {
            x_shift,
            y_shift,
            rotation_angle,
            accepted,
        } => {
            if *accepted {
                fit.x_shift = *x_shift;
                fit.y_shift = *y_shift;
                fit.rotation_angle = *rotation_angle;
            }
        }
        FitEvent::Completed {
            width,
            length,
            centre,
        } => {
            fit.width = Some(*width);
            fit.length = Some(*length);
            fit.circle_centre = Some(*centre);
        }
    }
}
