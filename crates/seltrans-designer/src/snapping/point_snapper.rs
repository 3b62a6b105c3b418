//! Snapping to fixed points and an optional rectangular grid.

use super::{
    SnapCandidatePoint, SnapConstraint, SnapTargetType, SnappedPoint, Snapper,
};
use crate::selection::SharedItem;
use seltrans_core::Point;
use seltrans_settings::{GridSettings, SnapSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Targets closer than this to a constraint count as lying on it.
const ON_CONSTRAINT_EPSILON: f64 = 1e-6;

/// A point that can be snapped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapTarget {
    pub point: Point,
    /// Item the point belongs to
    #[serde(default)]
    pub owner: Option<String>,
    /// The point is its owner's rotation center
    #[serde(default)]
    pub rotation_center: bool,
}

impl SnapTarget {
    pub fn new(point: Point) -> Self {
        Self {
            point,
            owner: None,
            rotation_center: false,
        }
    }

    pub fn owned_by(point: Point, owner: impl Into<String>) -> Self {
        Self {
            point,
            owner: Some(owner.into()),
            rotation_center: false,
        }
    }

    pub fn center_of(point: Point, owner: impl Into<String>) -> Self {
        Self {
            rotation_center: true,
            ..Self::owned_by(point, owner)
        }
    }
}

/// Snaps to registered target points and grid intersections.
#[derive(Debug, Clone, Default)]
pub struct PointSnapper {
    settings: SnapSettings,
    targets: Vec<SnapTarget>,
    ignored: HashSet<String>,
    center_sources: HashSet<String>,
}

impl PointSnapper {
    pub fn new(settings: SnapSettings) -> Self {
        Self {
            settings,
            targets: Vec::new(),
            ignored: HashSet::new(),
            center_sources: HashSet::new(),
        }
    }

    pub fn settings(&self) -> &SnapSettings {
        &self.settings
    }

    pub fn targets(&self) -> &[SnapTarget] {
        &self.targets
    }

    pub fn add_target(&mut self, target: SnapTarget) {
        self.targets.push(target);
    }

    /// Registers an item's nodes and rotation center as targets.
    pub fn add_item_targets(&mut self, item: &SharedItem) {
        let item = item.borrow();
        let owner = item.id().to_string();
        for point in item.snap_points() {
            self.targets.push(SnapTarget::owned_by(point, owner.clone()));
        }
        if let Some(center) = item.center() {
            self.targets.push(SnapTarget::center_of(center, owner));
        }
    }

    fn live_targets(&self) -> impl Iterator<Item = &SnapTarget> {
        self.targets.iter().filter(move |t| match &t.owner {
            Some(owner) => {
                !self.ignored.contains(owner)
                    && !(t.rotation_center && self.center_sources.contains(owner))
            }
            None => true,
        })
    }

    fn nearest_within_tolerance(
        &self,
        candidate: &SnapCandidatePoint,
        from: Point,
        found: impl Iterator<Item = (Point, SnapTargetType)>,
        constrained: bool,
    ) -> Option<SnappedPoint> {
        let tolerance = self.settings.tolerance;
        let (point, target, distance) = found
            .map(|(p, t)| (p, t, p.distance_to(&from)))
            .filter(|(_, _, d)| *d <= tolerance)
            .min_by(|a, b| a.2.total_cmp(&b.2))?;

        let mut snapped = SnappedPoint::new(point, candidate.source, target, distance, tolerance);
        snapped.constrained = constrained;
        Some(snapped)
    }
}

fn nearest_line(origin: f64, spacing: f64, value: f64) -> f64 {
    origin + ((value - origin) / spacing).round() * spacing
}

/// Grid lines on both sides of `value`.
fn lines_around(origin: f64, spacing: f64, value: f64) -> [f64; 2] {
    let k = ((value - origin) / spacing).floor();
    [origin + k * spacing, origin + (k + 1.0) * spacing]
}

fn grid_intersection(grid: &GridSettings, p: Point) -> Point {
    Point::new(
        nearest_line(grid.origin.x, grid.spacing.x, p.x),
        nearest_line(grid.origin.y, grid.spacing.y, p.y),
    )
}

/// Crossings of `constraint` with the grid lines around `p`.
fn grid_crossings(grid: &GridSettings, constraint: &SnapConstraint, p: Point) -> Vec<Point> {
    let xs = lines_around(grid.origin.x, grid.spacing.x, p.x);
    let ys = lines_around(grid.origin.y, grid.spacing.y, p.y);
    let mut crossings = Vec::new();

    match *constraint {
        SnapConstraint::Line { point, direction } => {
            if direction.x.abs() > f64::EPSILON {
                for x in xs {
                    let t = (x - point.x) / direction.x;
                    crossings.push(point + direction * t);
                }
            }
            if direction.y.abs() > f64::EPSILON {
                for y in ys {
                    let t = (y - point.y) / direction.y;
                    crossings.push(point + direction * t);
                }
            }
        }
        SnapConstraint::Circle { center, radius } => {
            for x in xs {
                let dx = x - center.x;
                if dx.abs() <= radius {
                    let dy = (radius * radius - dx * dx).sqrt();
                    crossings.push(Point::new(x, center.y + dy));
                    crossings.push(Point::new(x, center.y - dy));
                }
            }
            for y in ys {
                let dy = y - center.y;
                if dy.abs() <= radius {
                    let dx = (radius * radius - dy * dy).sqrt();
                    crossings.push(Point::new(center.x + dx, y));
                    crossings.push(Point::new(center.x - dx, y));
                }
            }
        }
    }
    crossings
}

impl Snapper for PointSnapper {
    fn some_snapper_might_snap(&self) -> bool {
        self.settings.enabled && (!self.targets.is_empty() || self.settings.grid.is_some())
    }

    fn set_ignored_items(&mut self, ids: &[String]) {
        self.ignored = ids.iter().cloned().collect();
    }

    fn set_rotation_center_source(&mut self, ids: &[String]) {
        self.center_sources = ids.iter().cloned().collect();
    }

    fn snap_weight(&self) -> f64 {
        self.settings.snap_weight
    }

    fn free_snap(&mut self, candidate: &SnapCandidatePoint) -> Option<SnappedPoint> {
        if !self.settings.enabled {
            return None;
        }
        let p = candidate.point;
        let nodes = self.live_targets().map(|t| (t.point, SnapTargetType::Node));
        let grid = self
            .settings
            .grid
            .as_ref()
            .map(|g| (grid_intersection(g, p), SnapTargetType::Grid));

        self.nearest_within_tolerance(candidate, p, nodes.chain(grid), false)
    }

    fn constrained_snap(
        &mut self,
        candidate: &SnapCandidatePoint,
        constraint: &SnapConstraint,
    ) -> Option<SnappedPoint> {
        if !self.settings.enabled {
            return None;
        }
        let projected = constraint.projection(candidate.point);
        let nodes = self
            .live_targets()
            .filter(|t| constraint.distance_to(t.point) < ON_CONSTRAINT_EPSILON)
            .map(|t| (t.point, SnapTargetType::Node));
        let crossings = self
            .settings
            .grid
            .as_ref()
            .map(|g| grid_crossings(g, constraint, projected))
            .unwrap_or_default()
            .into_iter()
            .map(|p| (p, SnapTargetType::GridLine));

        self.nearest_within_tolerance(candidate, projected, nodes.chain(crossings), true)
    }

    fn multiple_of_grid_pitch(&self, delta: Point, _reference: Point) -> Point {
        match &self.settings.grid {
            Some(grid) => Point::new(
                (delta.x / grid.spacing.x).round() * grid.spacing.x,
                (delta.y / grid.spacing.y).round() * grid.spacing.y,
            ),
            None => delta,
        }
    }
}

/// Snapper that never snaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnap;

impl Snapper for NoSnap {}
