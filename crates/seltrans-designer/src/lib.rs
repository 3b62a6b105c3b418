//! # SelTrans Designer
//!
//! Interactive transformation of a selection of drawing items: moving,
//! scaling, stretching, skewing and rotating them by dragging handles,
//! with snapping and stroke-aware bounding boxes.
//!
//! ## Core Components
//!
//! - **Transform engine**: [`SelectionTransformer`] runs grab/drag/ungrab
//!   sessions and the per-handle knot protocol
//! - **Handles**: the fixed table of 17 handles and their bbox positions
//! - **Scale math**: scale, skew and angle factors from pointer positions
//! - **Stroke**: visual/geometric bounding box reconciliation
//! - **Snapping**: the [`Snapper`] boundary, candidate reduction and a
//!   point/grid reference snapper
//! - **Collaborators**: selection, document, undo and status traits with
//!   in-memory implementations
//!
//! ## Architecture
//!
//! ```text
//! SelectionTransformer
//!   ├── TransformSession (snapshot taken at grab)
//!   ├── Requests (scale, stretch, skew, rotate, center, move)
//!   └── Desktop
//!         ├── Selection / Document (items)
//!         ├── Snapper + SnapIndicator
//!         └── UndoRecorder + StatusSink
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seltrans_designer::{Desktop, Drawing, DrawingItem, Modifiers, SelectionTransformer};
//!
//! let drawing = shared(Drawing::new());
//! let item = drawing.borrow_mut().add(DrawingItem::rect("r", Rect::new(0.0, 0.0, 100.0, 50.0)));
//! let desktop = Desktop::new(Config::default(), drawing.clone()).with_selection(vec![item]);
//! let mut transformer = SelectionTransformer::new(desktop);
//!
//! let handle = handles::find("scale-bottom-right").unwrap();
//! transformer.handle_grab(handle)?;
//! transformer.drag_handle(handle, Point::new(200.0, 100.0), Modifiers::NONE);
//! transformer.handle_ungrab(handle)?;
//! ```

pub mod drawing;
pub mod handles;
pub mod history;
pub mod messages;
pub mod modifiers;
pub mod scale_math;
pub mod scene;
pub mod selection;
pub mod snapping;
pub mod stroke;
pub mod transform;

pub use drawing::{Drawing, DrawingItem};
pub use handles::{Handle, HandleKind, HandleState, HANDLES};
pub use history::{UndoHistory, UndoLabel, UndoRecorder};
pub use messages::{MessageLevel, StatusLog, StatusSink, TracingStatus};
pub use modifiers::Modifiers;
pub use scene::{ItemReport, ReplayReport, Scene, Step};
pub use selection::{Document, Item, Selection, SharedItem};
pub use snapping::{
    IndicatorState, NoSnap, PointSnapper, PureTransform, SnapCandidatePoint, SnapIndicator,
    SnapTarget, SnappedPoint, Snapper,
};
pub use stroke::{ReconcileError, StrokePolicy};
pub use transform::{Desktop, Markers, SelectionTransformer, TransformSession};
