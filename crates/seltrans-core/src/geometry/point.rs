//! Points and axis selectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

/// One of the two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dim2 {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
}

impl Dim2 {
    /// Both axes in index order.
    pub const ALL: [Dim2; 2] = [Dim2::X, Dim2::Y];

    /// The perpendicular axis.
    pub fn other(self) -> Dim2 {
        match self {
            Dim2::X => Dim2::Y,
            Dim2::Y => Dim2::X,
        }
    }

    /// Index of the axis (X = 0, Y = 1).
    pub fn index(self) -> usize {
        match self {
            Dim2::X => 0,
            Dim2::Y => 1,
        }
    }
}

impl fmt::Display for Dim2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim2::X => write!(f, "X"),
            Dim2::Y => write!(f, "Y"),
        }
    }
}

/// A point (or vector) in desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean length of the vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (*self - *other).length()
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The vector rotated by +90 degrees.
    pub fn rot90(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Component-wise product.
    pub fn scale_by(&self, factors: Point) -> Point {
        Point::new(self.x * factors.x, self.y * factors.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Index<Dim2> for Point {
    type Output = f64;

    fn index(&self, dim: Dim2) -> &f64 {
        match dim {
            Dim2::X => &self.x,
            Dim2::Y => &self.y,
        }
    }
}

impl IndexMut<Dim2> for Point {
    fn index_mut(&mut self, dim: Dim2) -> &mut f64 {
        match dim {
            Dim2::X => &mut self.x,
            Dim2::Y => &mut self.y,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}
