//! Axis-aligned rectangles.

use super::{Affine, Dim2, Point};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Builds the rectangle spanned by two opposite points, in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::from_points(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Smallest rectangle containing every point, or `None` for an empty iterator.
    pub fn hull<I>(points: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut rect = Rect::from_points(first, first);
        for p in iter {
            rect.expand_to(p);
        }
        Some(rect)
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn dimensions(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    /// Extent along one axis.
    pub fn extent(&self, dim: Dim2) -> f64 {
        self.max[dim] - self.min[dim]
    }

    pub fn midpoint(&self) -> Point {
        (self.min + self.max) * 0.5
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns corner `i` (mod 4): min, (max.x, min.y), max, (min.x, max.y).
    pub fn corner(&self, i: usize) -> Point {
        match i % 4 {
            0 => self.min,
            1 => Point::new(self.max.x, self.min.y),
            2 => self.max,
            _ => Point::new(self.min.x, self.max.y),
        }
    }

    /// Midpoint of the edge running from corner `i` to corner `i + 1`.
    pub fn edge_midpoint(&self, i: usize) -> Point {
        (self.corner(i) + self.corner(i + 1)) * 0.5
    }

    /// Point at the given fraction of the box: `min + dimensions * fraction`.
    pub fn point_at(&self, fraction: Point) -> Point {
        self.min + self.dimensions().scale_by(fraction)
    }

    /// True when either extent is zero.
    pub fn has_zero_area(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn expand_to(&mut self, p: Point) {
        self.min = Point::new(self.min.x.min(p.x), self.min.y.min(p.y));
        self.max = Point::new(self.max.x.max(p.x), self.max.y.max(p.y));
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn expand_by(&mut self, amount: f64) {
        self.min -= Point::new(amount, amount);
        self.max += Point::new(amount, amount);
        if self.min.x > self.max.x {
            let mid = (self.min.x + self.max.x) * 0.5;
            self.min.x = mid;
            self.max.x = mid;
        }
        if self.min.y > self.max.y {
            let mid = (self.min.y + self.max.y) * 0.5;
            self.min.y = mid;
            self.max.y = mid;
        }
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Bounding box of the four transformed corners.
    pub fn transformed(&self, affine: &Affine) -> Rect {
        let mut rect = Rect::from_points(self.corner(0) * *affine, self.corner(0) * *affine);
        for i in 1..4 {
            rect.expand_to(self.corner(i) * *affine);
        }
        rect
    }
}

/// Union of optional rectangles, skipping `None`s.
pub fn union_all<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Option<Rect>>,
{
    rects
        .into_iter()
        .flatten()
        .reduce(|acc, r| acc.union(&r))
}
