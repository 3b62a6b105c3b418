//! Candidate points collected at grab time.

use super::{SnapCandidatePoint, SnapSourceType};
use seltrans_core::{Point, Rect};
use smallvec::SmallVec;

/// Which bounding-box points become candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BBoxPointKinds {
    pub corners: bool,
    pub edge_midpoints: bool,
    pub midpoint: bool,
}

/// Corners, edge midpoints and the midpoint of `rect`, as enabled.
pub fn bbox_candidates(rect: &Rect, kinds: BBoxPointKinds) -> SmallVec<[SnapCandidatePoint; 9]> {
    let mut points = SmallVec::new();
    if kinds.corners {
        points.extend(
            (0..4).map(|i| SnapCandidatePoint::new(rect.corner(i), SnapSourceType::BBoxCorner)),
        );
    }
    if kinds.edge_midpoints {
        points.extend((0..4).map(|i| {
            SnapCandidatePoint::new(rect.edge_midpoint(i), SnapSourceType::BBoxEdgeMidpoint)
        }));
    }
    if kinds.midpoint {
        points.push(SnapCandidatePoint::new(
            rect.midpoint(),
            SnapSourceType::BBoxMidpoint,
        ));
    }
    points
}

/// Snap candidates of the current session.
///
/// Special points (nodes) and bounding-box points are kept apart because
/// they snap against different origins. In closest-only mode a distance
/// ranking of both is kept and exactly one point is active at a time.
#[derive(Debug, Clone, Default)]
pub struct SnapSources {
    special: Vec<SnapCandidatePoint>,
    bbox: Vec<SnapCandidatePoint>,
    ranked: Vec<SnapCandidatePoint>,
    cursor: usize,
}

impl SnapSources {
    pub fn new(special: Vec<SnapCandidatePoint>, bbox: Vec<SnapCandidatePoint>) -> Self {
        Self {
            special,
            bbox,
            ranked: Vec::new(),
            cursor: 0,
        }
    }

    pub fn special(&self) -> &[SnapCandidatePoint] {
        &self.special
    }

    pub fn bbox(&self) -> &[SnapCandidatePoint] {
        &self.bbox
    }

    /// Distance ranking built by [`SnapSources::keep_closest_only`].
    pub fn ranked(&self) -> &[SnapCandidatePoint] {
        &self.ranked
    }

    pub fn is_empty(&self) -> bool {
        self.special.is_empty() && self.bbox.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drops special points beyond `max`; returns how many were dropped.
    pub fn cap_special(&mut self, max: usize) -> usize {
        let dropped = self.special.len().saturating_sub(max);
        self.special.truncate(max);
        dropped
    }

    /// Keeps only the candidate closest to `reference`.
    ///
    /// Categories that cannot snap are discarded first.
    pub fn keep_closest_only(&mut self, reference: Point, bbox_snappable: bool, nodes_snappable: bool) {
        if !nodes_snappable {
            self.special.clear();
        }
        if !bbox_snappable {
            self.bbox.clear();
        }

        let mut ranked: Vec<SnapCandidatePoint> = self
            .special
            .iter()
            .chain(self.bbox.iter())
            .map(|c| SnapCandidatePoint {
                distance: c.point.distance_to(&reference),
                ..*c
            })
            .collect();
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        self.ranked = ranked;
        self.cursor = 0;
        self.activate_cursor();
    }

    /// Moves to the next farther candidate, or the next closer one with
    /// `reverse`, wrapping around. Returns the newly active candidate.
    pub fn advance(&mut self, reverse: bool) -> Option<SnapCandidatePoint> {
        let n = self.ranked.len();
        if n == 0 {
            return None;
        }
        self.cursor = if reverse {
            (self.cursor + n - 1) % n
        } else {
            (self.cursor + 1) % n
        };
        self.activate_cursor()
    }

    /// The active candidate in closest-only mode.
    pub fn current(&self) -> Option<SnapCandidatePoint> {
        self.ranked.get(self.cursor).copied()
    }

    fn activate_cursor(&mut self) -> Option<SnapCandidatePoint> {
        self.special.clear();
        self.bbox.clear();
        let current = self.current()?;
        if current.source.is_bbox() {
            self.bbox.push(current);
        } else {
            self.special.push(current);
        }
        Some(current)
    }
}
