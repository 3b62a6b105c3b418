//! Affine transforms and axis scale factors.

use super::{are_near, Dim2, Point, EPSILON};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut, Mul, MulAssign};

/// Per-axis scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn identity() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    pub const fn uniform(s: f64) -> Self {
        Self { x: s, y: s }
    }

    pub fn as_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<Dim2> for Scale {
    type Output = f64;

    fn index(&self, dim: Dim2) -> &f64 {
        match dim {
            Dim2::X => &self.x,
            Dim2::Y => &self.y,
        }
    }
}

impl IndexMut<Dim2> for Scale {
    fn index_mut(&mut self, dim: Dim2) -> &mut f64 {
        match dim {
            Dim2::X => &mut self.x,
            Dim2::Y => &mut self.y,
        }
    }
}

impl Mul<Scale> for Point {
    type Output = Point;

    fn mul(self, rhs: Scale) -> Point {
        Point::new(self.x * rhs.x, self.y * rhs.y)
    }
}

/// A 2x3 affine transform `[c0 c1 c2 c3 c4 c5]`.
///
/// A point maps as `x' = c0*x + c2*y + c4`, `y' = c1*x + c3*y + c5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    c: [f64; 6],
}

impl Affine {
    pub const fn new(c0: f64, c1: f64, c2: f64, c3: f64, c4: f64, c5: f64) -> Self {
        Self {
            c: [c0, c1, c2, c3, c4, c5],
        }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn translate(offset: Point) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, offset.x, offset.y)
    }

    pub fn scale(s: Scale) -> Self {
        Self::new(s.x, 0.0, 0.0, s.y, 0.0, 0.0)
    }

    /// Rotation by `radians` (positive turns +X towards +Y).
    pub fn rotate(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation taking +X onto the unit vector `v`.
    pub fn rotate_to(v: Point) -> Self {
        Self::new(v.x, v.y, -v.y, v.x, 0.0, 0.0)
    }

    /// `T(-origin) * self * T(origin)`: the same transform performed around `origin`.
    pub fn about(&self, origin: Point) -> Self {
        Affine::translate(-origin) * *self * Affine::translate(origin)
    }

    pub fn coefficients(&self) -> [f64; 6] {
        self.c
    }

    pub fn translation(&self) -> Point {
        Point::new(self.c[4], self.c[5])
    }

    pub fn det(&self) -> f64 {
        self.c[0] * self.c[3] - self.c[1] * self.c[2]
    }

    /// Square root of |det|: the average length scaling.
    pub fn descrim(&self) -> f64 {
        self.det().abs().sqrt()
    }

    pub fn without_translation(&self) -> Self {
        Self::new(self.c[0], self.c[1], self.c[2], self.c[3], 0.0, 0.0)
    }

    pub fn inverse(&self) -> Option<Affine> {
        let m = Matrix3::new(
            self.c[0], self.c[2], self.c[4], //
            self.c[1], self.c[3], self.c[5], //
            0.0, 0.0, 1.0,
        );
        let inv = m.try_inverse()?;
        Some(Affine::new(
            inv[(0, 0)],
            inv[(1, 0)],
            inv[(0, 1)],
            inv[(1, 1)],
            inv[(0, 2)],
            inv[(1, 2)],
        ))
    }

    pub fn is_identity(&self) -> bool {
        self.is_identity_within(EPSILON)
    }

    pub fn is_identity_within(&self, eps: f64) -> bool {
        self.is_translation_within(eps)
            && are_near(self.c[4], 0.0, eps)
            && are_near(self.c[5], 0.0, eps)
    }

    /// True when the linear part is the identity (any offset).
    pub fn is_translation(&self) -> bool {
        self.is_translation_within(EPSILON)
    }

    pub fn is_translation_within(&self, eps: f64) -> bool {
        are_near(self.c[0], 1.0, eps)
            && are_near(self.c[1], 0.0, eps)
            && are_near(self.c[2], 0.0, eps)
            && are_near(self.c[3], 1.0, eps)
    }

    pub fn is_singular(&self) -> bool {
        are_near(self.det(), 0.0, EPSILON)
    }

    /// Non-singular axis-aligned scale with no offset.
    pub fn is_scale(&self) -> bool {
        !self.is_singular()
            && are_near(self.c[1], 0.0, EPSILON)
            && are_near(self.c[2], 0.0, EPSILON)
            && are_near(self.c[4], 0.0, EPSILON)
            && are_near(self.c[5], 0.0, EPSILON)
    }

    /// Pure rotation about the origin.
    pub fn is_rotation(&self) -> bool {
        are_near(self.c[0], self.c[3], EPSILON)
            && are_near(self.c[1], -self.c[2], EPSILON)
            && are_near(self.c[4], 0.0, EPSILON)
            && are_near(self.c[5], 0.0, EPSILON)
            && are_near(self.c[0] * self.c[0] + self.c[1] * self.c[1], 1.0, EPSILON)
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Scale> for Affine {
    fn from(s: Scale) -> Self {
        Affine::scale(s)
    }
}

impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({}, {}, {}, {}, {}, {})",
            self.c[0], self.c[1], self.c[2], self.c[3], self.c[4], self.c[5]
        )
    }
}

impl Index<usize> for Affine {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.c[i]
    }
}

impl IndexMut<usize> for Affine {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.c[i]
    }
}

/// `a * b` applies `a` first, then `b`.
impl Mul for Affine {
    type Output = Affine;

    fn mul(self, o: Affine) -> Affine {
        let a = &self.c;
        let b = &o.c;
        Affine::new(
            a[0] * b[0] + a[1] * b[2],
            a[0] * b[1] + a[1] * b[3],
            a[2] * b[0] + a[3] * b[2],
            a[2] * b[1] + a[3] * b[3],
            a[4] * b[0] + a[5] * b[2] + b[4],
            a[4] * b[1] + a[5] * b[3] + b[5],
        )
    }
}

impl MulAssign for Affine {
    fn mul_assign(&mut self, rhs: Affine) {
        *self = *self * rhs;
    }
}

impl Mul<Affine> for Point {
    type Output = Point;

    fn mul(self, m: Affine) -> Point {
        Point::new(
            m.c[0] * self.x + m.c[2] * self.y + m.c[4],
            m.c[1] * self.x + m.c[3] * self.y + m.c[5],
        )
    }
}
