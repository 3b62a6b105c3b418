//! Handle layout around the selection bounding box.
//!
//! Fractions are measured from the bounding box minimum, with y growing
//! downward, so `(1, 1)` is the bottom-right corner.

use seltrans_core::{Dim2, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What dragging a handle does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    Scale,
    Stretch,
    Skew,
    Rotate,
    Center,
}

/// Which family of handles is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleState {
    /// Corner scale and edge stretch handles
    #[default]
    Scale,
    /// Corner rotate and edge skew handles plus the rotation center
    Rotate,
}

impl HandleState {
    /// The other state.
    pub fn toggled(self) -> Self {
        match self {
            HandleState::Scale => HandleState::Rotate,
            HandleState::Rotate => HandleState::Scale,
        }
    }
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleState::Scale => write!(f, "scale"),
            HandleState::Rotate => write!(f, "rotate"),
        }
    }
}

impl HandleKind {
    /// True when handles of this kind are shown in `state`.
    pub fn visible_in(self, state: HandleState) -> bool {
        match self {
            HandleKind::Scale | HandleKind::Stretch => state == HandleState::Scale,
            HandleKind::Skew | HandleKind::Rotate | HandleKind::Center => {
                state == HandleState::Rotate
            }
        }
    }
}

/// A single handle: its kind and where it sits on the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub name: &'static str,
    pub kind: HandleKind,
    /// Position as a fraction of the bounding box
    pub fraction: Point,
    /// Edge handles act on the axis perpendicular to their edge
    pub axis: Option<Dim2>,
}

impl Handle {
    const fn new(
        name: &'static str,
        kind: HandleKind,
        x: f64,
        y: f64,
        axis: Option<Dim2>,
    ) -> Self {
        Self {
            name,
            kind,
            fraction: Point::new(x, y),
            axis,
        }
    }

    /// Where the handle is drawn. The center handle follows the rotation
    /// center and has no position without one.
    pub fn position(&self, bbox: &Rect, center: Option<Point>) -> Option<Point> {
        match self.kind {
            HandleKind::Center => center,
            _ => Some(bbox.point_at(self.fraction)),
        }
    }

    /// Position of the handle diagonally across the bounding box.
    pub fn opposite_fraction(&self) -> Point {
        Point::new(1.0 - self.fraction.x, 1.0 - self.fraction.y)
    }
}

/// All handles, the rotation center first.
pub static HANDLES: [Handle; 17] = [
    Handle::new("center", HandleKind::Center, 0.5, 0.5, None),
    Handle::new("scale-bottom-left", HandleKind::Scale, 0.0, 1.0, None),
    Handle::new("stretch-bottom", HandleKind::Stretch, 0.5, 1.0, Some(Dim2::Y)),
    Handle::new("scale-bottom-right", HandleKind::Scale, 1.0, 1.0, None),
    Handle::new("stretch-right", HandleKind::Stretch, 1.0, 0.5, Some(Dim2::X)),
    Handle::new("scale-top-right", HandleKind::Scale, 1.0, 0.0, None),
    Handle::new("stretch-top", HandleKind::Stretch, 0.5, 0.0, Some(Dim2::Y)),
    Handle::new("scale-top-left", HandleKind::Scale, 0.0, 0.0, None),
    Handle::new("stretch-left", HandleKind::Stretch, 0.0, 0.5, Some(Dim2::X)),
    Handle::new("skew-bottom", HandleKind::Skew, 0.5, 1.0, Some(Dim2::Y)),
    Handle::new("skew-right", HandleKind::Skew, 1.0, 0.5, Some(Dim2::X)),
    Handle::new("skew-top", HandleKind::Skew, 0.5, 0.0, Some(Dim2::Y)),
    Handle::new("skew-left", HandleKind::Skew, 0.0, 0.5, Some(Dim2::X)),
    Handle::new("rotate-bottom-right", HandleKind::Rotate, 1.0, 1.0, None),
    Handle::new("rotate-top-right", HandleKind::Rotate, 1.0, 0.0, None),
    Handle::new("rotate-top-left", HandleKind::Rotate, 0.0, 0.0, None),
    Handle::new("rotate-bottom-left", HandleKind::Rotate, 0.0, 1.0, None),
];

/// Looks a handle up by name.
pub fn find(name: &str) -> Option<&'static Handle> {
    HANDLES.iter().find(|h| h.name == name)
}

/// The rotation center handle.
pub fn center() -> &'static Handle {
    &HANDLES[0]
}
