//! Shared fixture: a drawing, its selection and recording collaborators.

use seltrans_core::{shared, Affine, BBoxType, Point, Rect, Shared};
use seltrans_designer::{
    handles, Desktop, Drawing, DrawingItem, Handle, IndicatorState, PointSnapper, SelectionTransformer,
    SharedItem, StatusLog, UndoHistory,
};
use seltrans_settings::{Config, GridSettings};

pub struct Fixture {
    pub drawing: Shared<Drawing>,
    pub items: Vec<SharedItem>,
    pub undo: Shared<UndoHistory>,
    pub status: Shared<StatusLog>,
    pub indicator: Shared<IndicatorState>,
    pub transformer: SelectionTransformer,
}

impl Fixture {
    /// Every item in `items` goes into the drawing and the selection.
    pub fn new(config: Config, items: Vec<DrawingItem>) -> Self {
        let drawing = shared(Drawing::new());
        let items: Vec<SharedItem> = items
            .into_iter()
            .map(|item| drawing.borrow_mut().add(item))
            .collect();

        let snapper = PointSnapper::new(config.snapping.clone());
        let undo = shared(UndoHistory::new());
        let status = shared(StatusLog::default());
        let indicator = shared(IndicatorState::default());
        let desktop = Desktop::new(config, drawing.clone())
            .with_selection(items.clone())
            .with_snapper(snapper)
            .with_undo(undo.clone())
            .with_status(status.clone())
            .with_indicator(indicator.clone());

        Self {
            drawing,
            items,
            undo,
            status,
            indicator,
            transformer: SelectionTransformer::new(desktop),
        }
    }

    pub fn affine(&self, index: usize) -> Affine {
        self.items[index].borrow().affine()
    }

    pub fn undo_labels(&self) -> Vec<String> {
        self.undo
            .borrow()
            .entries()
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    pub fn status(&self) -> Option<String> {
        self.status.borrow().current().map(str::to_string)
    }
}

/// Geometric bounding boxes, snapping off.
pub fn plain_config() -> Config {
    let mut config = Config::default();
    config.transform.bounding_box = BBoxType::Geometric;
    config.snapping.enabled = false;
    config
}

/// Geometric bounding boxes, snapping to a 10 px grid.
pub fn grid_config() -> Config {
    let mut config = Config::default();
    config.transform.bounding_box = BBoxType::Geometric;
    config.snapping.grid = Some(GridSettings {
        origin: Point::zero(),
        spacing: Point::new(10.0, 10.0),
    });
    config
}

/// 100 x 50 rectangle at the origin.
pub fn rect(id: &str) -> DrawingItem {
    DrawingItem::rect(id, Rect::new(0.0, 0.0, 100.0, 50.0))
}

pub fn handle(name: &str) -> &'static Handle {
    handles::find(name).expect("known handle")
}

pub fn near(a: Point, b: Point) -> bool {
    a.distance_to(&b) < 1e-9
}

pub fn affine_near(a: Affine, b: Affine) -> bool {
    a.coefficients()
        .iter()
        .zip(b.coefficients())
        .all(|(x, y)| (x - y).abs() < 1e-9)
}
