//! Snapping: candidate points, snap results and the snapper interface.
//!
//! The engine collects candidate points at grab time and asks a
//! [`Snapper`] to correct each intended transformation. Whatever decides
//! what a "better" snap is lives here, not in the engine.

pub mod candidates;
pub mod indicator;
pub mod point_snapper;

pub use candidates::{bbox_candidates, BBoxPointKinds, SnapSources};
pub use indicator::{IndicatorState, SnapIndicator};
pub use point_snapper::{NoSnap, PointSnapper, SnapTarget};

use seltrans_core::geometry::sign;
use seltrans_core::{Affine, Dim2, Point, Scale, Shared};
use serde::{Deserialize, Serialize};

/// Tolerances are clamped to this before normalizing distances.
const MAX_NORMALIZING_TOLERANCE: f64 = 50.0;

/// Penalty for snaps that only project onto a constraint.
const CONSTRAINT_ONLY_PENALTY: f64 = 1e6;

/// Where a candidate point comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapSourceType {
    /// Path node or other special point of an item
    Node,
    BBoxCorner,
    BBoxEdgeMidpoint,
    BBoxMidpoint,
    RotationCenter,
}

impl SnapSourceType {
    pub fn is_bbox(self) -> bool {
        matches!(
            self,
            SnapSourceType::BBoxCorner
                | SnapSourceType::BBoxEdgeMidpoint
                | SnapSourceType::BBoxMidpoint
        )
    }
}

/// What a point snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapTargetType {
    Node,
    Grid,
    /// Intersection of a constraint with a grid line
    GridLine,
    /// Plain projection onto a constraint, not a real snap
    Constraint,
}

/// A point that may snap, together with its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapCandidatePoint {
    pub point: Point,
    pub source: SnapSourceType,
    /// Distance to the grab point, filled in when ranking
    pub distance: f64,
}

impl SnapCandidatePoint {
    pub fn new(point: Point, source: SnapSourceType) -> Self {
        Self {
            point,
            source,
            distance: f64::INFINITY,
        }
    }
}

/// A line or circle a snapped point must stay on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapConstraint {
    Line { point: Point, direction: Point },
    Circle { center: Point, radius: f64 },
}

impl SnapConstraint {
    pub fn line(point: Point, direction: Point) -> Self {
        SnapConstraint::Line { point, direction }
    }

    pub fn axis(point: Point, axis: Dim2) -> Self {
        let mut direction = Point::zero();
        direction[axis] = 1.0;
        SnapConstraint::Line { point, direction }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        SnapConstraint::Circle { center, radius }
    }

    /// Closest point of the constraint to `p`.
    pub fn projection(&self, p: Point) -> Point {
        match *self {
            SnapConstraint::Line { point, direction } => {
                let len2 = direction.dot(&direction);
                if len2 == 0.0 {
                    return point;
                }
                point + direction * ((p - point).dot(&direction) / len2)
            }
            SnapConstraint::Circle { center, radius } => {
                let v = p - center;
                let len = v.length();
                if len == 0.0 {
                    center + Point::new(radius, 0.0)
                } else {
                    center + v * (radius / len)
                }
            }
        }
    }

    pub fn distance_to(&self, p: Point) -> f64 {
        self.projection(p).distance_to(&p)
    }
}

/// A successful snap of one candidate point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnappedPoint {
    pub point: Point,
    pub source: SnapSourceType,
    pub target: SnapTargetType,
    /// Snap distance, or the transformation error once a transform snapped
    pub distance: f64,
    pub tolerance: f64,
    pub second_distance: f64,
    pub always_snap: bool,
    /// Snapped to something that pins both coordinates
    pub fully_constrained: bool,
    /// Found while snapping along a constraint
    pub constrained: bool,
    /// Distance of the source point to the pointer
    pub pointer_distance: f64,
}

impl SnappedPoint {
    pub fn new(
        point: Point,
        source: SnapSourceType,
        target: SnapTargetType,
        distance: f64,
        tolerance: f64,
    ) -> Self {
        Self {
            point,
            source,
            target,
            distance,
            tolerance,
            second_distance: f64::INFINITY,
            always_snap: false,
            fully_constrained: true,
            constrained: false,
            pointer_distance: f64::INFINITY,
        }
    }

    /// True when `other` should replace `self` as the best snap.
    ///
    /// With a weight the distance to the pointer is blended in: 0 ranks only
    /// by snap distance, 1 only by closeness to the pointer.
    pub fn is_other_snap_better(&self, other: &SnappedPoint, weight: Option<f64>) -> bool {
        let mut dist_other = other.distance;
        let mut dist_this = self.distance;

        if let Some(w) = weight.filter(|w| *w > 0.0) {
            let pointer_this = self.pointer_distance;
            let pointer_other = other.pointer_distance;
            let comparable = pointer_this.is_finite() || pointer_other.is_finite();
            if comparable && !(w == 1.0 && pointer_this == pointer_other) {
                let norm_p = pointer_this.min(pointer_other) + 1.0;
                let norm_t_other = other.tolerance.min(MAX_NORMALIZING_TOLERANCE);
                let norm_t_this = self.tolerance.min(MAX_NORMALIZING_TOLERANCE);
                dist_other = w * pointer_other / norm_p + (1.0 - w) * dist_other / norm_t_other;
                dist_this = w * pointer_this / norm_p + (1.0 - w) * dist_this / norm_t_this;
            }
        }

        if other.target == SnapTargetType::Constraint {
            dist_other += CONSTRAINT_ONLY_PENALTY;
        }
        if self.target == SnapTargetType::Constraint {
            dist_this += CONSTRAINT_ONLY_PENALTY;
        }

        let closer = dist_other < dist_this;
        let gains_always = other.always_snap && !self.always_snap;
        let loses_always = !other.always_snap && self.always_snap;
        let gains_full = other.fully_constrained && !self.fully_constrained;
        let loses_full = !other.fully_constrained && self.fully_constrained;
        let tied = dist_other == dist_this;
        let better_second =
            other.second_distance < self.second_distance && self.second_distance.is_finite();
        let free_over_constrained = !other.constrained && self.constrained;

        (closer || gains_always || gains_full || (tied && (better_second || free_over_constrained)))
            && !loses_always
            && (!loses_full || gains_always)
    }
}

/// A snapped quantity and the snap that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult<T> {
    pub value: T,
    pub snapped: SnappedPoint,
}

/// Which candidate set won.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChosenSnap<T> {
    BBox(SnapResult<T>),
    Special(SnapResult<T>),
}

impl<T> ChosenSnap<T> {
    pub fn result(&self) -> &SnapResult<T> {
        match self {
            ChosenSnap::BBox(r) | ChosenSnap::Special(r) => r,
        }
    }
}

/// Picks between the bounding-box snap and the special-point snap.
pub fn choose_snap<T>(
    bbox: Option<SnapResult<T>>,
    special: Option<SnapResult<T>>,
    weight: Option<f64>,
) -> Option<ChosenSnap<T>> {
    match (bbox, special) {
        (None, None) => None,
        (Some(b), None) => Some(ChosenSnap::BBox(b)),
        (None, Some(s)) => Some(ChosenSnap::Special(s)),
        (Some(b), Some(s)) => {
            if b.snapped.is_other_snap_better(&s.snapped, weight) {
                Some(ChosenSnap::Special(s))
            } else {
                Some(ChosenSnap::BBox(b))
            }
        }
    }
}

/// An intended transformation, before or after snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PureTransform {
    Translate {
        delta: Point,
        /// Movement restricted to one axis
        constraint: Option<Dim2>,
    },
    Scale {
        factors: Scale,
        origin: Point,
        /// Aspect ratio locked
        uniform: bool,
    },
    Stretch {
        magnitude: f64,
        origin: Point,
        axis: Dim2,
        /// Scale the other axis by the same amount
        symmetrical: bool,
    },
    Skew {
        skew: f64,
        /// Integer scale along the skew axis (mirroring)
        scale: f64,
        origin: Point,
        /// Axis points move along
        direction: Dim2,
    },
    Rotate {
        angle: f64,
        origin: Point,
    },
}

/// Minimum distance from the origin for a point to determine a factor.
const FACTOR_EPSILON: f64 = 1e-6;

/// `delta` restricted to `axis`, when there is one.
fn along(delta: Point, axis: Option<Dim2>) -> Point {
    match axis {
        Some(axis) => {
            let mut restricted = Point::zero();
            restricted[axis] = delta[axis];
            restricted
        }
        None => delta,
    }
}

impl PureTransform {
    /// Where `p` ends up.
    pub fn apply(&self, p: Point) -> Point {
        match *self {
            PureTransform::Translate { delta, constraint } => p + along(delta, constraint),
            PureTransform::Scale {
                factors, origin, ..
            } => (p - origin) * factors + origin,
            PureTransform::Stretch {
                magnitude,
                origin,
                axis,
                symmetrical,
            } => {
                let mut factors = Scale::identity();
                factors[axis] = magnitude;
                if symmetrical {
                    factors[axis.other()] = magnitude.abs();
                }
                (p - origin) * factors + origin
            }
            PureTransform::Skew {
                skew,
                scale,
                origin,
                direction,
            } => {
                let other = direction.other();
                let mut transformed = Point::zero();
                transformed[direction] = p[direction] + skew * (p[other] - origin[other]);
                transformed[other] = (p - origin)[other] * scale + origin[other];
                transformed
            }
            PureTransform::Rotate { angle, origin } => p * Affine::rotate(angle).about(origin),
        }
    }

    /// The curve `original` may move along, once transformed to `transformed`.
    pub fn constraint(&self, original: Point, transformed: Point) -> Option<SnapConstraint> {
        match *self {
            PureTransform::Translate { constraint, .. } => {
                constraint.map(|axis| SnapConstraint::axis(transformed, axis))
            }
            PureTransform::Scale {
                origin, uniform, ..
            } => uniform.then(|| SnapConstraint::line(origin, transformed - origin)),
            PureTransform::Stretch {
                origin,
                axis,
                symmetrical,
                ..
            } => Some(if symmetrical {
                SnapConstraint::line(origin, transformed - origin)
            } else {
                SnapConstraint::axis(transformed, axis)
            }),
            PureTransform::Skew { direction, .. } => {
                Some(SnapConstraint::axis(transformed, direction))
            }
            PureTransform::Rotate { origin, .. } => {
                Some(SnapConstraint::circle(origin, original.distance_to(&origin)))
            }
        }
    }

    /// The transformation that takes `original` exactly onto `snapped`,
    /// with its distance from `self` as primary and secondary metric.
    pub fn snapped_from(&self, original: Point, snapped: Point) -> Option<(PureTransform, f64, f64)> {
        match *self {
            PureTransform::Translate { delta, constraint } => {
                let result = along(snapped - original, constraint);
                let metric = (result - along(delta, constraint)).length();
                Some((
                    PureTransform::Translate {
                        delta: result,
                        constraint,
                    },
                    metric,
                    f64::INFINITY,
                ))
            }
            PureTransform::Scale {
                factors,
                origin,
                uniform,
            } => {
                let a = snapped - origin;
                let b = original - origin;
                let mut result: [Option<f64>; 2] = [None, None];
                for dim in Dim2::ALL {
                    if b[dim].abs() > 1e-4 {
                        let s = a[dim] / b[dim];
                        if ((s.abs()) - factors[dim].abs()).abs() > 1e-7 {
                            result[dim.index()] = Some(s);
                        }
                    }
                }
                if uniform {
                    match result {
                        [Some(x), Some(y)] => {
                            if x.abs() < y.abs() {
                                result[1] = Some(x.abs() * sign(factors.y));
                            } else {
                                result[0] = Some(y.abs() * sign(factors.x));
                            }
                        }
                        [Some(x), None] => result[1] = Some(x.abs() * sign(factors.y)),
                        [None, Some(y)] => result[0] = Some(y.abs() * sign(factors.x)),
                        [None, None] => {}
                    }
                }
                let errors: Vec<f64> = Dim2::ALL
                    .iter()
                    .filter_map(|d| result[d.index()].map(|s| (s - factors[*d]).abs()))
                    .collect();
                let (metric, second) = match errors.as_slice() {
                    [] => return None,
                    [e] => (*e, f64::INFINITY),
                    [e0, e1, ..] => (e0.min(*e1), e0.max(*e1)),
                };
                let snapped_factors = Scale::new(
                    result[0].unwrap_or(factors.x),
                    result[1].unwrap_or(factors.y),
                );
                Some((
                    PureTransform::Scale {
                        factors: snapped_factors,
                        origin,
                        uniform,
                    },
                    metric,
                    second,
                ))
            }
            PureTransform::Stretch {
                magnitude,
                origin,
                axis,
                symmetrical,
            } => {
                let a = snapped - origin;
                let b = original - origin;
                let other = axis.other();
                let result = if b[axis].abs() > FACTOR_EPSILON {
                    a[axis] / b[axis]
                } else if symmetrical && b[other].abs() > FACTOR_EPSILON {
                    a[other] / b[other]
                } else {
                    return None;
                };
                Some((
                    PureTransform::Stretch {
                        magnitude: result,
                        origin,
                        axis,
                        symmetrical,
                    },
                    (result - magnitude).abs(),
                    f64::INFINITY,
                ))
            }
            PureTransform::Skew {
                skew,
                scale,
                origin,
                direction,
            } => {
                let other = direction.other();
                let b = original - origin;
                if b[other].abs() <= FACTOR_EPSILON {
                    return None;
                }
                let result = (snapped[direction] - original[direction]) / b[other];
                Some((
                    PureTransform::Skew {
                        skew: result,
                        scale,
                        origin,
                        direction,
                    },
                    (result - skew).abs(),
                    f64::INFINITY,
                ))
            }
            PureTransform::Rotate { angle, origin } => {
                let a = snapped - origin;
                let b = original - origin;
                let result = b.cross(&a).atan2(b.dot(&a));
                Some((
                    PureTransform::Rotate {
                        angle: result,
                        origin,
                    },
                    (result - angle).abs(),
                    f64::INFINITY,
                ))
            }
        }
    }

    pub fn delta(&self) -> Option<Point> {
        match self {
            PureTransform::Translate { delta, .. } => Some(*delta),
            _ => None,
        }
    }

    pub fn factors(&self) -> Option<Scale> {
        match self {
            PureTransform::Scale { factors, .. } => Some(*factors),
            _ => None,
        }
    }

    pub fn magnitude(&self) -> Option<f64> {
        match self {
            PureTransform::Stretch { magnitude, .. } => Some(*magnitude),
            _ => None,
        }
    }

    pub fn skew(&self) -> Option<f64> {
        match self {
            PureTransform::Skew { skew, .. } => Some(*skew),
            _ => None,
        }
    }

    pub fn angle(&self) -> Option<f64> {
        match self {
            PureTransform::Rotate { angle, .. } => Some(*angle),
            _ => None,
        }
    }
}

/// Result of snapping against several constraints at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstrainedSnap {
    /// Snapped point, or the projection onto the nearest constraint
    pub point: Point,
    pub snapped: Option<SnappedPoint>,
}

/// Finds snap targets for points and transformations.
///
/// Implementors provide [`Snapper::free_snap`] and
/// [`Snapper::constrained_snap`]; transformation snapping is built on top.
pub trait Snapper {
    /// False when no snap can possibly happen; skips candidate collection
    fn some_snapper_might_snap(&self) -> bool {
        false
    }

    /// Items whose own points must not be snapped to
    fn set_ignored_items(&mut self, _ids: &[String]) {}

    /// Items whose rotation centers must not be snapped to
    fn set_rotation_center_source(&mut self, _ids: &[String]) {}

    /// Pointer weight used when ranking snaps of different candidates
    fn snap_weight(&self) -> f64 {
        0.5
    }

    fn free_snap(&mut self, _candidate: &SnapCandidatePoint) -> Option<SnappedPoint> {
        None
    }

    fn constrained_snap(
        &mut self,
        _candidate: &SnapCandidatePoint,
        _constraint: &SnapConstraint,
    ) -> Option<SnappedPoint> {
        None
    }

    /// Nearest multiple of the grid pitch to `delta`; unchanged without a grid
    fn multiple_of_grid_pitch(&self, delta: Point, _reference: Point) -> Point {
        delta
    }

    /// Snaps `candidate` along each constraint and keeps the best result.
    /// Without a snap (or with `dont_snap`) the point is projected onto the
    /// nearest constraint.
    fn multiple_constrained_snaps(
        &mut self,
        candidate: &SnapCandidatePoint,
        constraints: &[SnapConstraint],
        dont_snap: bool,
    ) -> ConstrainedSnap {
        let mut best: Option<SnappedPoint> = None;
        if !dont_snap {
            for constraint in constraints {
                if let Some(snapped) = self.constrained_snap(candidate, constraint) {
                    if best.is_none_or(|b| b.is_other_snap_better(&snapped, None)) {
                        best = Some(snapped);
                    }
                }
            }
        }

        if let Some(snapped) = best {
            return ConstrainedSnap {
                point: snapped.point,
                snapped: Some(snapped),
            };
        }

        let point = constraints
            .iter()
            .map(|c| c.projection(candidate.point))
            .min_by(|a, b| {
                a.distance_to(&candidate.point)
                    .total_cmp(&b.distance_to(&candidate.point))
            })
            .unwrap_or(candidate.point);
        ConstrainedSnap {
            point,
            snapped: None,
        }
    }

    /// Snaps every candidate under `transform` and returns the corrected
    /// transformation of the best one.
    fn snap_transform(
        &mut self,
        candidates: &[SnapCandidatePoint],
        pointer: Point,
        transform: &PureTransform,
    ) -> Option<SnapResult<PureTransform>> {
        if candidates.is_empty() || !self.some_snapper_might_snap() {
            return None;
        }

        let weight = self.snap_weight();
        let mut best: Option<SnapResult<PureTransform>> = None;
        for candidate in candidates {
            let transformed = transform.apply(candidate.point);
            let moved = SnapCandidatePoint {
                point: transformed,
                ..*candidate
            };
            let snapped = match transform.constraint(candidate.point, transformed) {
                Some(constraint) => self.constrained_snap(&moved, &constraint),
                None => self.free_snap(&moved),
            };
            let Some(mut snapped) = snapped else {
                continue;
            };
            let Some((value, metric, second)) = transform.snapped_from(candidate.point, snapped.point)
            else {
                continue;
            };
            snapped.pointer_distance = pointer.distance_to(&candidate.point);
            snapped.distance = metric;
            snapped.second_distance = second;

            if best.is_none_or(|b| b.snapped.is_other_snap_better(&snapped, Some(weight))) {
                best = Some(SnapResult { value, snapped });
            }
        }
        best
    }
}

impl<T: Snapper> Snapper for Shared<T> {
    fn some_snapper_might_snap(&self) -> bool {
        self.borrow().some_snapper_might_snap()
    }

    fn set_ignored_items(&mut self, ids: &[String]) {
        self.borrow_mut().set_ignored_items(ids)
    }

    fn set_rotation_center_source(&mut self, ids: &[String]) {
        self.borrow_mut().set_rotation_center_source(ids)
    }

    fn snap_weight(&self) -> f64 {
        self.borrow().snap_weight()
    }

    fn free_snap(&mut self, candidate: &SnapCandidatePoint) -> Option<SnappedPoint> {
        self.borrow_mut().free_snap(candidate)
    }

    fn constrained_snap(
        &mut self,
        candidate: &SnapCandidatePoint,
        constraint: &SnapConstraint,
    ) -> Option<SnappedPoint> {
        self.borrow_mut().constrained_snap(candidate, constraint)
    }

    fn multiple_of_grid_pitch(&self, delta: Point, reference: Point) -> Point {
        self.borrow().multiple_of_grid_pitch(delta, reference)
    }
}
