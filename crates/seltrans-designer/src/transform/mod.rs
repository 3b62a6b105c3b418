//! # Selection transformer
//!
//! Turns pointer drags on the selection handles into affine transforms.
//! A drag is a session: [`SelectionTransformer::grab`] snapshots the
//! items, every pointer move computes a transform relative to that
//! snapshot and applies it, and [`SelectionTransformer::ungrab`] writes the
//! result back and records one undo step.
//!
//! Handles act through the knot protocol ([`SelectionTransformer::handle_grab`],
//! [`SelectionTransformer::handle_request`], [`SelectionTransformer::handle_moved`],
//! [`SelectionTransformer::handle_ungrab`]); moving the whole selection goes
//! through [`SelectionTransformer::move_to`].

mod requests;
mod session;
mod stamp;

pub use session::{ItemSnapshot, Origins, TransformSession};

use crate::handles::{self, Handle, HandleKind, HandleState, HANDLES};
use crate::history::{UndoHistory, UndoLabel, UndoRecorder};
use crate::messages::{MessageLevel, StatusSink, TracingStatus};
use crate::modifiers::Modifiers;
use crate::selection::{Document, Selection, SharedItem};
use crate::snapping::{
    bbox_candidates, BBoxPointKinds, IndicatorState, PointSnapper, SnapCandidatePoint,
    SnapIndicator, SnapSourceType, SnapSources, Snapper,
};
use seltrans_core::{Affine, BBoxType, Point, Result, ShowMode, TransformError};
use seltrans_settings::{Config, TransformPreferences};

/// The collaborators the transformer works with.
pub struct Desktop {
    pub config: Config,
    pub selection: Selection,
    pub document: Box<dyn Document>,
    pub snapper: Box<dyn Snapper>,
    pub indicator: Box<dyn SnapIndicator>,
    pub undo: Box<dyn UndoRecorder>,
    pub status: Box<dyn StatusSink>,
}

impl Desktop {
    /// Desktop over `document` with a point snapper built from the snap
    /// settings, an in-memory undo history and status going to the log.
    pub fn new(config: Config, document: impl Document + 'static) -> Self {
        let snapper = PointSnapper::new(config.snapping.clone());
        Self {
            config,
            selection: Selection::new(),
            document: Box::new(document),
            snapper: Box::new(snapper),
            indicator: Box::new(IndicatorState::default()),
            undo: Box::new(UndoHistory::new()),
            status: Box::new(TracingStatus),
        }
    }

    pub fn with_selection(mut self, items: Vec<SharedItem>) -> Self {
        self.selection.set(items);
        self
    }

    pub fn with_snapper(mut self, snapper: impl Snapper + 'static) -> Self {
        self.snapper = Box::new(snapper);
        self
    }

    pub fn with_indicator(mut self, indicator: impl SnapIndicator + 'static) -> Self {
        self.indicator = Box::new(indicator);
        self
    }

    pub fn with_undo(mut self, undo: impl UndoRecorder + 'static) -> Self {
        self.undo = Box::new(undo);
        self
    }

    pub fn with_status(mut self, status: impl StatusSink + 'static) -> Self {
        self.status = Box::new(status);
        self
    }

    pub fn prefs(&self) -> &TransformPreferences {
        &self.config.transform
    }
}

/// Transient on-canvas markers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Markers {
    /// Fixed point of the current transformation
    pub norm: Option<Point>,
    /// Where the dragged handle is
    pub grip: Option<Point>,
    /// Transformed bounding box edges in outline mode
    pub outline: Option<[(Point, Point); 4]>,
}

impl Markers {
    fn hide(&mut self) {
        *self = Markers::default();
    }

    fn outline_of(corners: [Point; 4]) -> [(Point, Point); 4] {
        [0, 1, 2, 3].map(|i| (corners[i], corners[(i + 1) % 4]))
    }
}

/// Interactive transformation of the selection.
pub struct SelectionTransformer {
    desktop: Desktop,
    session: TransformSession,
    state: HandleState,
    show_handles: bool,
    empty: bool,
    center: Option<Point>,
    center_resolved: bool,
    markers: Markers,
    last_applied: Option<(UndoLabel, Affine)>,
}

impl SelectionTransformer {
    pub fn new(desktop: Desktop) -> Self {
        let mut transformer = Self {
            desktop,
            session: TransformSession::default(),
            state: HandleState::Scale,
            show_handles: true,
            empty: true,
            center: None,
            center_resolved: false,
            markers: Markers::default(),
            last_applied: None,
        };
        transformer.update_volatile_state();
        transformer
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut Desktop {
        &mut self.desktop
    }

    pub fn session(&self) -> &TransformSession {
        &self.session
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn is_grabbed(&self) -> bool {
        self.session.grabbed
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn handles_shown(&self) -> bool {
        self.show_handles
    }

    /// Label and affine of the last transform written back by [`Self::ungrab`].
    pub fn last_applied(&self) -> Option<(UndoLabel, Affine)> {
        self.last_applied
    }

    fn prefs(&self) -> &TransformPreferences {
        &self.desktop.config.transform
    }

    /// The rotation center, computed from the selection on first use.
    pub fn resolve_center(&mut self) -> Option<Point> {
        if !self.center_resolved && !self.empty {
            let kind = self.prefs().bounding_box;
            self.center = self.desktop.selection.center(kind);
            self.center_resolved = true;
        }
        self.center
    }

    fn invalidate_center(&mut self) {
        self.center = None;
        self.center_resolved = false;
    }

    fn update_volatile_state(&mut self) {
        let selection = &self.desktop.selection;
        self.empty = selection.is_empty();
        if self.empty {
            return;
        }

        let kind = self.desktop.config.transform.bounding_box;
        self.session.bbox = selection.bounds(kind);
        self.session.visual_bbox = selection.visual_bounds();
        if self.session.bbox.is_none() {
            self.empty = true;
            return;
        }
        self.session.stroke_width = selection.stroke_average_width();
    }

    fn update_handles(&mut self) {
        if self.show_handles && !self.empty {
            self.resolve_center();
        }
    }

    /// Starts a session at `p`.
    ///
    /// `handle` is the grabbed handle as a fraction of the bounding box, or
    /// `None` when the whole selection is being moved.
    pub fn grab(
        &mut self,
        p: Point,
        handle: Option<Point>,
        show_handles: bool,
        translating: bool,
    ) -> Result<()> {
        if self.session.grabbed {
            tracing::warn!("grab while a transform session is already active");
            return Err(TransformError::AlreadyGrabbed.into());
        }

        self.session.grabbed = true;
        self.show_handles = show_handles;
        self.update_volatile_state();
        self.session.current_relative_affine = Affine::identity();
        self.session.relative_affine = Affine::identity();
        self.session.absolute_affine = Affine::identity();
        self.session.changed = false;
        self.session.center_moved = false;
        self.session.stamp_cache.clear();
        self.session.sources.clear();

        if self.empty {
            tracing::debug!("grab on an empty selection");
            return Ok(());
        }

        let selection = &self.desktop.selection;
        let kind = self.desktop.config.transform.bounding_box;
        self.session.items = selection.items().iter().map(ItemSnapshot::capture).collect();
        self.session.handle_fraction = handle;
        self.session.bbox = selection.bounds(kind);
        self.session.visual_bbox = selection.visual_bounds();
        self.session.geometric_bbox = selection.geometric_bounds();
        self.session.point = p;
        self.session.point_geom = match (self.session.geometric_bbox, handle) {
            (Some(geometric), Some(fraction)) => geometric.point_at(fraction),
            _ => p,
        };

        let ids = selection.ids();
        self.desktop.snapper.set_ignored_items(&ids);
        self.collect_snap_sources(p, translating);

        self.session.opposite = match (self.session.bbox, handle) {
            (Some(bbox), Some(fraction)) => {
                let across = Point::new(1.0 - fraction.x, 1.0 - fraction.y);
                let for_bbox = bbox.point_at(across);
                let for_special = self
                    .session
                    .geometric_bbox
                    .map_or(for_bbox, |g| g.point_at(across));
                Origins {
                    origin: for_bbox,
                    for_bbox_points: for_bbox,
                    for_special_points: for_special,
                }
            }
            (Some(bbox), None) => Origins::uniform(bbox.midpoint()),
            (None, _) => Origins::uniform(p),
        };
        self.session.origin = self.session.opposite;

        if handle.is_some() {
            self.markers.norm = Some(self.session.origin.origin);
            self.markers.grip = Some(p);
        }
        if self.prefs().show == ShowMode::Outline {
            if let Some(bbox) = self.session.bbox {
                self.markers.outline = Some(Markers::outline_of([0, 1, 2, 3].map(|i| bbox.corner(i))));
            }
        }

        self.update_handles();
        tracing::debug!(
            x = p.x,
            y = p.y,
            items = self.session.items.len(),
            special = self.session.sources.special().len(),
            bbox_points = self.session.sources.bbox().len(),
            "grabbed selection"
        );
        Ok(())
    }

    fn collect_snap_sources(&mut self, p: Point, translating: bool) {
        let selection = &self.desktop.selection;
        let prefs = &self.desktop.config.transform;
        let snapping = &self.desktop.config.snapping;
        let might_snap = self.desktop.snapper.some_snapper_might_snap();

        let mut special = Vec::new();
        if might_snap && snapping.nodes_snappable() {
            special = selection
                .snap_points()
                .into_iter()
                .map(|point| SnapCandidatePoint::new(point, SnapSourceType::Node))
                .collect();
        }

        let mut bbox_points = Vec::new();
        if might_snap && snapping.bbox_snappable() {
            let kinds = BBoxPointKinds {
                corners: snapping.bbox_corners,
                edge_midpoints: snapping.bbox_edge_midpoints,
                midpoint: snapping.bbox_midpoints,
            };
            let n = selection.len();
            let per_item = translating
                && ((n > 0 && n < prefs.per_item_bbox_limit) || prefs.snap_closest_only);
            if per_item {
                for item in selection.items() {
                    if let Some(bounds) = item.borrow().desktop_bounds(prefs.bounding_box) {
                        bbox_points.extend(bbox_candidates(&bounds, kinds));
                    }
                }
            } else if let Some(bounds) = self.session.bbox {
                bbox_points.extend(bbox_candidates(&bounds, kinds));
            }
        }

        let mut sources = SnapSources::new(special, bbox_points);
        if prefs.snap_closest_only {
            sources.keep_closest_only(p, snapping.bbox_snappable(), snapping.nodes_snappable());
        } else {
            let dropped = sources.cap_special(prefs.max_snap_candidates);
            if dropped > 0 {
                tracing::warn!(
                    dropped,
                    max = prefs.max_snap_candidates,
                    "Limiting the number of snap candidate points"
                );
            }
        }
        self.session.sources = sources;
    }

    /// Applies `rel`, performed around `norm`, to the snapshot.
    pub fn transform(&mut self, rel: &Affine, norm: Point) -> Result<()> {
        if !self.session.grabbed {
            tracing::warn!("transform without grab");
            return Err(TransformError::NotGrabbed.into());
        }
        if self.empty {
            return Err(TransformError::EmptySelection.into());
        }
        if let Some(id) = self.session.stale_item(self.desktop.document.as_ref()) {
            tracing::debug!(%id, "selection changed under the drag, skipping update");
            return Err(TransformError::StaleItem { id }.into());
        }

        let affine = rel.about(norm);
        match self.desktop.config.transform.show {
            ShowMode::Content => {
                for snapshot in &self.session.items {
                    let mut item = snapshot.item.borrow_mut();
                    if item.is_root() {
                        let err = TransformError::RootItem {
                            id: item.id().to_string(),
                        };
                        tracing::warn!("{err}");
                        self.desktop
                            .status
                            .flash(MessageLevel::Warning, "Cannot transform an embedded SVG.");
                        continue;
                    }
                    item.set_affine(snapshot.affine * affine);
                }
            }
            ShowMode::Outline => {
                if let Some(bbox) = self.session.bbox {
                    let corners = [0, 1, 2, 3].map(|i| bbox.corner(i) * affine);
                    self.markers.outline = Some(Markers::outline_of(corners));
                }
            }
        }

        self.session.current_relative_affine = affine;
        self.session.changed = true;
        self.update_handles();
        Ok(())
    }

    /// Ends the session, writes the transform to the document and records
    /// one undo step.
    pub fn ungrab(&mut self) -> Result<()> {
        if !self.session.grabbed {
            tracing::warn!("ungrab without grab");
            return Err(TransformError::NotGrabbed.into());
        }

        self.session.grabbed = false;
        self.show_handles = true;
        self.desktop.indicator.remove_source();
        self.desktop.snapper.set_ignored_items(&[]);
        self.desktop.snapper.set_rotation_center_source(&[]);
        self.markers.hide();
        self.session.stamp_cache.clear();
        self.desktop.status.clear();
        let snapshots = self.session.release();

        self.update_volatile_state();
        let affine = self.session.current_relative_affine;

        if !snapshots.is_empty() && self.session.changed {
            if !affine.is_identity() {
                let outline = self.prefs().show == ShowMode::Outline;
                self.write_back(&snapshots, affine, outline);

                if let Some(center) = self.center {
                    self.center = Some(center * affine);
                    self.center_resolved = true;
                }

                if !outline && !affine.is_translation() {
                    for snapshot in &snapshots {
                        let mut item = snapshot.item.borrow_mut();
                        if let (true, Some(center)) = (item.is_center_set(), snapshot.center) {
                            item.set_center(center * affine);
                            item.update_repr();
                        }
                    }
                }

                let label = classify(&affine);
                self.desktop.undo.commit(label);
                self.last_applied = Some((label, affine));
                tracing::info!(%label, %affine, "applied transform");
            }
        } else if !snapshots.is_empty() && self.session.center_moved {
            for snapshot in &snapshots {
                snapshot.item.borrow_mut().update_repr();
            }
            self.desktop.undo.commit(UndoLabel::SetCenter);
        }

        self.session.current_relative_affine = Affine::identity();
        self.session.changed = false;
        self.session.center_moved = false;
        self.update_handles();
        Ok(())
    }

    fn write_back(&self, snapshots: &[ItemSnapshot], affine: Affine, outline: bool) {
        for snapshot in snapshots {
            if !self.desktop.document.contains(&snapshot.item) {
                continue;
            }
            let mut item = snapshot.item.borrow_mut();
            if item.is_root() {
                continue;
            }
            if outline {
                let center = if item.is_center_set() { item.center() } else { None };
                item.set_affine(snapshot.affine * affine);
                if let Some(center) = center {
                    item.set_center(center * affine);
                }
            }
            item.update_repr();
        }
    }

    /// Moves the rotation center of the selection and all its items.
    pub fn set_center(&mut self, p: Point) {
        self.center = Some(p);
        self.center_resolved = true;
        if self.session.grabbed {
            for snapshot in &self.session.items {
                snapshot.item.borrow_mut().set_center(p);
            }
            self.session.center_moved = true;
        } else {
            for item in self.desktop.selection.items() {
                item.borrow_mut().set_center(p);
            }
        }
    }

    /// Back to the scale handles.
    pub fn reset_state(&mut self) {
        self.state = HandleState::Scale;
    }

    /// Switches between scale and rotate handles.
    pub fn increase_state(&mut self) {
        self.state = self.state.toggled();
        self.update_handles();
    }

    /// The selection's membership changed.
    pub fn selection_changed(&mut self) {
        if !self.session.grabbed {
            self.update_volatile_state();
            self.session.current_relative_affine = Affine::identity();
            self.invalidate_center();
            self.update_handles();
        }
    }

    /// Items of the selection were modified.
    pub fn selection_modified(&mut self) {
        if !self.session.grabbed {
            self.update_volatile_state();
            self.session.current_relative_affine = Affine::identity();
            self.session.changed = false;
            self.invalidate_center();
            self.update_handles();
        }
    }

    /// Replaces the selection.
    pub fn select(&mut self, items: Vec<SharedItem>) {
        self.desktop.selection.set(items);
        self.selection_changed();
    }

    pub fn set_bounding_box_type(&mut self, kind: BBoxType) {
        self.desktop.config.transform.bounding_box = kind;
        self.update_volatile_state();
        self.invalidate_center();
        self.update_handles();
    }

    /// Handles to draw for the current state, with their positions.
    pub fn visible_handles(&mut self) -> Vec<(&'static Handle, Point)> {
        if !self.show_handles || self.empty {
            return Vec::new();
        }
        let center = self.resolve_center();
        let Some(bbox) = self.session.bbox else {
            return Vec::new();
        };
        HANDLES
            .iter()
            .filter(|h| h.kind.visible_in(self.state))
            .filter_map(|h| h.position(&bbox, center).map(|p| (h, p)))
            .collect()
    }

    /// In closest-only mode, makes the next candidate (farther, or closer
    /// with `reverse`) the one that snaps.
    pub fn next_closest_point(&mut self, reverse: bool) -> Option<SnapCandidatePoint> {
        if !self.prefs().snap_closest_only {
            return None;
        }
        let current = self.session.sources.advance(reverse)?;
        self.desktop.indicator.set_source(&current);
        Some(current)
    }

    /// A handle knot was picked up.
    pub fn handle_grab(&mut self, handle: &Handle) -> Result<()> {
        let center = self.resolve_center();
        let bbox = self
            .session
            .bbox
            .filter(|_| !self.empty)
            .ok_or(TransformError::EmptySelection)?;
        let position = handle
            .position(&bbox, center)
            .ok_or(TransformError::NoCenter)?;

        self.grab(position, Some(handle.fraction), false, false)?;
        self.markers.grip = Some(position);
        self.markers.norm = Some(match handle.kind {
            HandleKind::Center => position,
            _ => self.session.origin.origin,
        });
        Ok(())
    }

    /// Picks the fixed point for `handle` under `modifiers`.
    ///
    /// Scale handles default to the opposite side and Shift switches to the
    /// rotation center; rotate handles do the reverse.
    fn select_anchor(&mut self, handle: &Handle, modifiers: Modifiers) -> bool {
        let rotating = self.state == HandleState::Rotate;
        if modifiers.shift == rotating && handle.kind != HandleKind::Center {
            self.session.origin = self.session.opposite;
            return true;
        }
        match self.resolve_center() {
            Some(center) => {
                self.session.origin = Origins::uniform(center);
                true
            }
            None => false,
        }
    }

    /// A handle knot wants to move to `position`; returns the corrected
    /// position or `None` when the move is rejected.
    pub fn handle_request(
        &mut self,
        handle: &Handle,
        position: Point,
        modifiers: Modifiers,
    ) -> Option<Point> {
        if !self.session.grabbed {
            return None;
        }
        if !self.select_anchor(handle, modifiers) {
            return None;
        }

        let corrected = match handle.kind {
            HandleKind::Scale => self.scale_request(position, modifiers),
            HandleKind::Stretch => self.stretch_request(handle, position, modifiers),
            HandleKind::Skew => self.skew_request(handle, position, modifiers),
            HandleKind::Rotate => self.rotate_request(position, modifiers),
            HandleKind::Center => self.center_request(position, modifiers),
        }?;

        self.markers.grip = Some(corrected);
        self.markers.norm = Some(match handle.kind {
            HandleKind::Center => corrected,
            _ => self.session.origin.origin,
        });
        Some(corrected)
    }

    /// A handle knot moved to `position`: transform the selection.
    pub fn handle_moved(&mut self, handle: &Handle, position: Point, _modifiers: Modifiers) {
        if !self.session.grabbed {
            return;
        }
        if let Some(id) = self.session.stale_item(self.desktop.document.as_ref()) {
            tracing::debug!(%id, "ignoring handle move on a stale selection");
            return;
        }

        let result = match handle.kind {
            HandleKind::Scale | HandleKind::Stretch => {
                let absolute = self.session.absolute_affine;
                self.transform(&absolute, Point::zero())
            }
            HandleKind::Skew | HandleKind::Rotate => {
                let relative = self.session.relative_affine;
                let origin = self.session.origin.origin;
                self.transform(&relative, origin)
            }
            HandleKind::Center => {
                self.set_center(position);
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::debug!(%err, "handle move not applied");
        }
    }

    /// Request followed by move, as a knot drag does.
    pub fn drag_handle(
        &mut self,
        handle: &Handle,
        position: Point,
        modifiers: Modifiers,
    ) -> Option<Point> {
        let corrected = self.handle_request(handle, position, modifiers)?;
        self.handle_moved(handle, corrected, modifiers);
        Some(corrected)
    }

    /// The handle knot was released.
    pub fn handle_ungrab(&mut self, _handle: &Handle) -> Result<()> {
        self.ungrab()
    }

    /// A handle was clicked without dragging. Shift-click on the center
    /// resets every item's rotation center.
    pub fn handle_click(&mut self, handle: &Handle, modifiers: Modifiers) -> bool {
        if handle.kind != HandleKind::Center || !modifiers.shift {
            return false;
        }
        for item in self.desktop.selection.items() {
            let mut item = item.borrow_mut();
            item.unset_center();
            item.update_repr();
        }
        self.invalidate_center();
        self.update_handles();
        self.desktop.undo.commit(UndoLabel::ResetCenter);
        true
    }

    /// Finds the center handle.
    pub fn center_handle() -> &'static Handle {
        handles::center()
    }
}

/// Undo label for a committed transform.
fn classify(affine: &Affine) -> UndoLabel {
    let linear = affine.without_translation();
    if affine.is_translation() {
        UndoLabel::Move
    } else if linear.is_scale() {
        UndoLabel::Scale
    } else if linear.is_rotation() {
        UndoLabel::Rotate
    } else {
        UndoLabel::Skew
    }
}
