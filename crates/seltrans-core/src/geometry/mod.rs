//! 2D geometry primitives used by the transformation engine.
//!
//! All affines follow the row-vector convention: a point is transformed as
//! `p * A`, and `A * B` applies `A` first and `B` second.

pub mod affine;
pub mod point;
pub mod rect;

pub use affine::{Affine, Scale};
pub use point::{Dim2, Point};
pub use rect::Rect;

/// Default tolerance for affine classification.
pub const EPSILON: f64 = 1e-6;

/// Returns true when `a` and `b` differ by at most `eps`.
#[inline]
pub fn are_near(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Returns -1 or 1 according to the sign of `x`; 1 for zero and NaN.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Wraps an angle in degrees into the half-open range (-180, 180].
pub fn mod360_symmetric(degrees: f64) -> f64 {
    let mut d = degrees % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}
