//! State of one grab-transform-ungrab interaction.

use crate::selection::{Document, SharedItem};
use crate::snapping::SnapSources;
use seltrans_core::{Affine, Point, Rect};

/// An item as it was when the session was grabbed.
#[derive(Clone)]
pub struct ItemSnapshot {
    pub item: SharedItem,
    pub affine: Affine,
    pub center: Option<Point>,
}

impl ItemSnapshot {
    pub fn capture(item: &SharedItem) -> Self {
        let borrowed = item.borrow();
        Self {
            item: item.clone(),
            affine: borrowed.affine(),
            center: borrowed.center(),
        }
    }
}

impl std::fmt::Debug for ItemSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemSnapshot")
            .field("item", &self.item.borrow().id())
            .field("affine", &self.affine)
            .field("center", &self.center)
            .finish()
    }
}

/// Fixed point of a transformation, one per kind of snap candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Origins {
    /// Used for the transformation itself
    pub origin: Point,
    /// Used when snapping bounding-box points
    pub for_bbox_points: Point,
    /// Used when snapping nodes, relative to the geometric bounding box
    pub for_special_points: Point,
}

impl Origins {
    /// The same point for all three.
    pub fn uniform(p: Point) -> Self {
        Self {
            origin: p,
            for_bbox_points: p,
            for_special_points: p,
        }
    }
}

/// Everything captured at grab and mutated while dragging.
///
/// The snapshot holds strong references to the items until the session
/// ends; [`TransformSession::release`] drops them.
#[derive(Default)]
pub struct TransformSession {
    pub(crate) grabbed: bool,
    pub(crate) items: Vec<ItemSnapshot>,
    /// Reference bounding box (visual or geometric per preferences)
    pub(crate) bbox: Option<Rect>,
    pub(crate) visual_bbox: Option<Rect>,
    pub(crate) geometric_bbox: Option<Rect>,
    pub(crate) stroke_width: f64,
    /// Grab point
    pub(crate) point: Point,
    /// Grab point moved onto the geometric bounding box
    pub(crate) point_geom: Point,
    /// Grabbed handle as a bbox fraction; `None` when translating
    pub(crate) handle_fraction: Option<Point>,
    pub(crate) opposite: Origins,
    pub(crate) origin: Origins,
    pub(crate) sources: SnapSources,
    pub(crate) relative_affine: Affine,
    pub(crate) absolute_affine: Affine,
    pub(crate) current_relative_affine: Affine,
    pub(crate) changed: bool,
    pub(crate) center_moved: bool,
    pub(crate) stamp_cache: Vec<SharedItem>,
}

impl std::fmt::Debug for TransformSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformSession")
            .field("grabbed", &self.grabbed)
            .field("items", &self.items)
            .field("bbox", &self.bbox)
            .field("point", &self.point)
            .field("origin", &self.origin)
            .field("current_relative_affine", &self.current_relative_affine)
            .field("changed", &self.changed)
            .field("center_moved", &self.center_moved)
            .field("stamp_cache", &self.stamp_cache.len())
            .finish_non_exhaustive()
    }
}

impl TransformSession {
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn items(&self) -> &[ItemSnapshot] {
        &self.items
    }

    pub fn bbox(&self) -> Option<Rect> {
        self.bbox
    }

    pub fn visual_bbox(&self) -> Option<Rect> {
        self.visual_bbox
    }

    pub fn geometric_bbox(&self) -> Option<Rect> {
        self.geometric_bbox
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn grab_point(&self) -> Point {
        self.point
    }

    pub fn origins(&self) -> Origins {
        self.origin
    }

    pub fn opposite(&self) -> Origins {
        self.opposite
    }

    pub fn sources(&self) -> &SnapSources {
        &self.sources
    }

    /// Transform applied to the items since grab, in desktop coordinates
    pub fn current_relative_affine(&self) -> Affine {
        self.current_relative_affine
    }

    /// Absolute transform computed by the last scale or stretch request
    pub fn absolute_affine(&self) -> Affine {
        self.absolute_affine
    }

    /// Relative transform computed by the last skew or rotate request
    pub fn relative_affine(&self) -> Affine {
        self.relative_affine
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// First snapshotted item that left the document.
    pub fn stale_item(&self, document: &dyn Document) -> Option<String> {
        self.items
            .iter()
            .find(|s| !document.contains(&s.item))
            .map(|s| s.item.borrow().id().to_string())
    }

    /// Drops the item snapshot and candidate points.
    pub(crate) fn release(&mut self) -> Vec<ItemSnapshot> {
        self.sources.clear();
        std::mem::take(&mut self.items)
    }
}
