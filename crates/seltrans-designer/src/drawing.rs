//! In-memory drawing: polygon items in a z-ordered list.

use crate::selection::{same_item, Document, Item, SharedItem};
use seltrans_core::{shared, Affine, BBoxType, Point, Rect};
use serde::{Deserialize, Serialize};

/// A polygon with an optional stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingItem {
    id: String,
    /// Nodes in item coordinates
    nodes: Vec<Point>,
    #[serde(default = "Affine::identity")]
    affine: Affine,
    #[serde(default)]
    stroke_width: Option<f64>,
    /// Rotation center relative to the visual bounding box midpoint
    #[serde(default)]
    center_offset: Option<Point>,
    #[serde(default)]
    root: bool,
    #[serde(skip)]
    revision: u64,
}

impl DrawingItem {
    pub fn new(id: impl Into<String>, nodes: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            nodes,
            affine: Affine::identity(),
            stroke_width: None,
            center_offset: None,
            root: false,
            revision: 0,
        }
    }

    /// Axis-aligned rectangle with nodes at its corners.
    pub fn rect(id: impl Into<String>, rect: Rect) -> Self {
        Self::new(id, (0..4).map(|i| rect.corner(i)).collect())
    }

    pub fn with_stroke(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_affine(mut self, affine: Affine) -> Self {
        self.affine = affine;
        self
    }

    /// Marks the item as a document root.
    pub fn as_root(mut self) -> Self {
        self.root = true;
        self
    }

    pub fn into_shared(self) -> SharedItem {
        shared(self)
    }

    /// Number of times the item was written back to the document
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn geometric_bounds(&self) -> Option<Rect> {
        Rect::hull(self.nodes.iter().map(|p| *p * self.affine))
    }
}

impl Item for DrawingItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn affine(&self) -> Affine {
        self.affine
    }

    fn set_affine(&mut self, affine: Affine) {
        self.affine = affine;
    }

    fn desktop_bounds(&self, kind: BBoxType) -> Option<Rect> {
        let mut bounds = self.geometric_bounds()?;
        if kind == BBoxType::Visual {
            if let Some(width) = self.stroke_width {
                bounds.expand_by(0.5 * width * self.affine.descrim());
            }
        }
        Some(bounds)
    }

    fn center(&self) -> Option<Point> {
        let mid = self.desktop_bounds(BBoxType::Visual)?.midpoint();
        Some(mid + self.center_offset.unwrap_or_default())
    }

    fn set_center(&mut self, center: Point) {
        if let Some(bounds) = self.desktop_bounds(BBoxType::Visual) {
            self.center_offset = Some(center - bounds.midpoint());
        }
    }

    fn unset_center(&mut self) {
        self.center_offset = None;
    }

    fn is_center_set(&self) -> bool {
        self.center_offset.is_some()
    }

    fn update_repr(&mut self) {
        self.revision += 1;
    }

    fn is_root(&self) -> bool {
        self.root
    }

    fn stroke_width(&self) -> Option<f64> {
        self.stroke_width
    }

    fn snap_points(&self) -> Vec<Point> {
        self.nodes.iter().map(|p| *p * self.affine).collect()
    }

    fn duplicate(&self, id: String) -> SharedItem {
        let mut copy = self.clone();
        copy.id = id;
        copy.revision = 0;
        shared(copy)
    }
}

/// Items in document order, bottom first.
#[derive(Default)]
pub struct Drawing {
    items: Vec<SharedItem>,
    copies: u64,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item on top and returns its shared handle.
    pub fn add(&mut self, item: DrawingItem) -> SharedItem {
        let item = item.into_shared();
        self.items.push(item.clone());
        item
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

    pub fn get(&self, id: &str) -> Option<SharedItem> {
        self.items.iter().find(|i| i.borrow().id() == id).cloned()
    }

    /// Detaches an item; handles to it stay valid but go stale.
    pub fn remove(&mut self, item: &SharedItem) -> bool {
        let before = self.items.len();
        self.items.retain(|i| !same_item(i, item));
        self.items.len() != before
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.borrow().id().to_string()).collect()
    }
}

impl Document for Drawing {
    fn contains(&self, item: &SharedItem) -> bool {
        self.items.iter().any(|i| same_item(i, item))
    }

    fn position(&self, item: &SharedItem) -> Option<usize> {
        self.items.iter().position(|i| same_item(i, item))
    }

    fn duplicate_in_place(&mut self, item: &SharedItem) -> Option<SharedItem> {
        let index = self.position(item)?;
        self.copies += 1;
        let id = format!("{}-copy{}", item.borrow().id(), self.copies);
        let copy = item.borrow().duplicate(id);
        self.items.insert(index, copy.clone());
        Some(copy)
    }
}

impl std::fmt::Debug for Drawing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drawing").field("items", &self.ids()).finish()
    }
}
