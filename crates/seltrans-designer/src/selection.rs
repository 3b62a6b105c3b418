//! Items, the selection and the document they live in.
//!
//! The engine only sees items through the [`Item`] trait and the document
//! through [`Document`]; [`crate::drawing`] provides in-memory versions.

use crate::stroke::average_stroke_width;
use seltrans_core::geometry::rect::union_all;
use seltrans_core::{Affine, BBoxType, Point, Rect, Shared};
use std::rc::Rc;

/// A transformable object.
pub trait Item {
    /// Stable identifier
    fn id(&self) -> &str;

    /// Item-to-desktop transform
    fn affine(&self) -> Affine;

    /// Replace the item-to-desktop transform; updates the live preview only
    fn set_affine(&mut self, affine: Affine);

    /// Bounding box in desktop coordinates
    fn desktop_bounds(&self, kind: BBoxType) -> Option<Rect>;

    /// Rotation center in desktop coordinates, set or defaulted
    fn center(&self) -> Option<Point>;

    /// Pin the rotation center at a desktop point
    fn set_center(&mut self, center: Point);

    /// Go back to the default rotation center
    fn unset_center(&mut self);

    fn is_center_set(&self) -> bool;

    /// Persist the current state to the document
    fn update_repr(&mut self);

    /// Document roots cannot be transformed
    fn is_root(&self) -> bool {
        false
    }

    /// Stroke width in item coordinates; `None` when unstroked
    fn stroke_width(&self) -> Option<f64>;

    /// Nodes and other special points in desktop coordinates
    fn snap_points(&self) -> Vec<Point>;

    /// Copy of this item under a new identifier
    fn duplicate(&self, id: String) -> SharedItem;
}

pub type SharedItem = Shared<dyn Item>;

/// Identity comparison for shared items.
pub fn same_item(a: &SharedItem, b: &SharedItem) -> bool {
    Rc::ptr_eq(a, b)
}

/// The document holding the items.
pub trait Document {
    /// True while the item is attached to the document
    fn contains(&self, item: &SharedItem) -> bool;

    /// Document (z-order) position, lowest first
    fn position(&self, item: &SharedItem) -> Option<usize>;

    /// Duplicate `item`; the copy takes its z-order position, directly below it
    fn duplicate_in_place(&mut self, item: &SharedItem) -> Option<SharedItem>;
}

impl<T: Document> Document for Shared<T> {
    fn contains(&self, item: &SharedItem) -> bool {
        self.borrow().contains(item)
    }

    fn position(&self, item: &SharedItem) -> Option<usize> {
        self.borrow().position(item)
    }

    fn duplicate_in_place(&mut self, item: &SharedItem) -> Option<SharedItem> {
        self.borrow_mut().duplicate_in_place(item)
    }
}

/// The currently selected items.
#[derive(Clone, Default)]
pub struct Selection {
    items: Vec<SharedItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SharedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item unless it is already selected.
    pub fn add(&mut self, item: SharedItem) {
        if !self.includes(&item) {
            self.items.push(item);
        }
    }

    pub fn set(&mut self, items: Vec<SharedItem>) {
        self.items.clear();
        for item in items {
            self.add(item);
        }
    }

    pub fn remove(&mut self, item: &SharedItem) {
        self.items.retain(|i| !same_item(i, item));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn includes(&self, item: &SharedItem) -> bool {
        self.items.iter().any(|i| same_item(i, item))
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.borrow().id().to_string()).collect()
    }

    /// Union of the items' bounding boxes of the given kind.
    pub fn bounds(&self, kind: BBoxType) -> Option<Rect> {
        union_all(self.items.iter().map(|i| i.borrow().desktop_bounds(kind)))
    }

    pub fn visual_bounds(&self) -> Option<Rect> {
        self.bounds(BBoxType::Visual)
    }

    pub fn geometric_bounds(&self) -> Option<Rect> {
        self.bounds(BBoxType::Geometric)
    }

    /// The first item's center when it has been set explicitly, otherwise
    /// the middle of the bounding box.
    pub fn center(&self, kind: BBoxType) -> Option<Point> {
        if let Some(first) = self.items.first() {
            let first = first.borrow();
            if first.is_center_set() {
                if let Some(center) = first.center() {
                    return Some(center);
                }
            }
        }
        self.bounds(kind).map(|b| b.midpoint())
    }

    /// Special points of every item.
    pub fn snap_points(&self) -> Vec<Point> {
        self.items
            .iter()
            .flat_map(|i| i.borrow().snap_points())
            .collect()
    }

    /// Mean desktop stroke width over the stroked items.
    pub fn stroke_average_width(&self) -> f64 {
        average_stroke_width(self.items.iter().map(|i| {
            let item = i.borrow();
            (item.stroke_width(), item.affine())
        }))
    }
}

impl From<Vec<SharedItem>> for Selection {
    fn from(items: Vec<SharedItem>) -> Self {
        let mut selection = Selection::new();
        selection.set(items);
        selection
    }
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection").field("items", &self.ids()).finish()
    }
}
