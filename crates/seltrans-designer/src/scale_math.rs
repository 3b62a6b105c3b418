//! Scale, skew and angle factors derived from pointer positions.
//!
//! Everything here is a pure function of its arguments.

use seltrans_core::geometry::sign;
use seltrans_core::{Dim2, Point, Scale};
use std::f64::consts::PI;

/// Minimum axis distance between the initial point and the origin for a
/// factor to be derived on that axis.
pub const AXIS_EPSILON: f64 = 1e-6;

/// Largest denominator produced by integer scale rounding.
pub const MAX_SCALE_DENOMINATOR: f64 = 10.0;

/// Scale (or skew) factors that take `initial` to `new` around `origin`.
///
/// In skew mode each factor is the offset along the *other* axis divided by
/// the initial distance along this axis. Axes where `initial` lies within
/// [`AXIS_EPSILON`] of the origin keep a factor of 1.
pub fn scale_factors(initial: Point, new: Point, origin: Point, skew: bool) -> Scale {
    let initial_delta = initial - origin;
    let new_delta = new - origin;
    let offset = new - initial;
    let mut scale = Scale::identity();

    for dim in Dim2::ALL {
        if initial_delta[dim].abs() > AXIS_EPSILON {
            scale[dim] = if skew {
                offset[dim.other()] / initial_delta[dim]
            } else {
                new_delta[dim] / initial_delta[dim]
            };
        }
    }

    scale
}

/// Rounds a factor to a whole multiple, or to the reciprocal of one.
///
/// Factors above 1 in magnitude round to the nearest integer; smaller ones
/// round to `1/n` with `n` clamped to [`MAX_SCALE_DENOMINATOR`]. Zero stays zero.
pub fn round_to_integer_factor(factor: f64) -> f64 {
    if factor.abs() > 1.0 {
        factor.round()
    } else if factor != 0.0 {
        let denominator = (1.0 / factor)
            .round()
            .clamp(-MAX_SCALE_DENOMINATOR, MAX_SCALE_DENOMINATOR);
        1.0 / denominator
    } else {
        factor
    }
}

/// Applies [`round_to_integer_factor`] to both axes.
pub fn round_scale(scale: Scale) -> Scale {
    Scale::new(
        round_to_integer_factor(scale.x),
        round_to_integer_factor(scale.y),
    )
}

/// Axis whose factor gets overwritten when locking the aspect ratio: the
/// one with the larger magnitude.
pub fn aspect_lock_axis(scale: &Scale) -> Dim2 {
    if scale.x.abs() > scale.y.abs() {
        Dim2::X
    } else {
        Dim2::Y
    }
}

/// Copies the magnitude of the other axis onto `dim`, keeping the sign of `dim`.
pub fn lock_aspect(scale: Scale, dim: Dim2) -> Scale {
    let mut locked = scale;
    locked[dim] = scale[dim.other()].abs() * sign(scale[dim]);
    locked
}

/// Rounds a rotation angle to the nearest multiple of `pi / divisions`.
pub fn snap_rotation_angle(radians: f64, divisions: u32) -> f64 {
    if divisions == 0 {
        return radians;
    }
    let n = f64::from(divisions);
    (PI / n) * (radians * n / PI + 0.5).floor()
}

/// Rounds a skew angle like [`snap_rotation_angle`], keeping it strictly
/// inside (-90, 90) degrees.
pub fn snap_skew_angle(radians: f64, divisions: u32) -> f64 {
    if divisions == 0 {
        return radians;
    }
    let n = f64::from(divisions);
    let half = f64::from(divisions / 2);
    let mut sections = (radians * n / PI + 0.5).floor();
    if sections.abs() >= half {
        sections = sign(sections) * (half - 1.0);
    }
    (PI / n) * sections
}

/// Skew never shrinks: factors below 1 collapse to their sign (mirroring
/// stays possible), larger ones round to whole multiples.
pub fn skew_scale_factor(scale: f64) -> f64 {
    if scale.abs() < 1.0 {
        sign(scale)
    } else {
        (scale + 0.5).floor()
    }
}
