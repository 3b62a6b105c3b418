//! Handle requests.
//!
//! Each request takes the position a handle is being dragged to, works out
//! the transform it implies (snapping where allowed) and returns the
//! position the handle should actually be shown at.

use super::SelectionTransformer;
use crate::handles::Handle;
use crate::messages::MessageLevel;
use crate::modifiers::Modifiers;
use crate::scale_math::{
    aspect_lock_axis, lock_aspect, round_scale, round_to_integer_factor, scale_factors,
    skew_scale_factor, snap_rotation_angle, snap_skew_angle,
};
use crate::snapping::{
    choose_snap, ChosenSnap, PureTransform, SnapCandidatePoint, SnapConstraint, SnapResult,
    SnapSourceType,
};
use crate::stroke::{
    geom_handle_position, scale_transform_for_uniform_stroke, visual_bbox_for, StrokePolicy,
};
use seltrans_core::geometry::mod360_symmetric;
use seltrans_core::units::format_length;
use seltrans_core::{Affine, BBoxType, Dim2, Point, Result, Scale, TransformError};

/// Smallest handle lever, relative to the bbox extent, that still skews.
const SKEW_LEVER_EPSILON: f64 = 1e-4;

/// Handle distances from the origin below this cannot define a rotation.
const ROTATE_RADIUS_EPSILON: f64 = 1e-15;

fn rejected(err: TransformError) -> Option<Point> {
    tracing::debug!(%err, "handle request rejected");
    None
}

/// Diagonal entries of a skew are kept at least this far from zero.
const MIN_DIAGONAL: f64 = 1e-15;

type Snapped = Option<SnapResult<PureTransform>>;

impl SelectionTransformer {
    fn stroke_policy(&self) -> StrokePolicy {
        let prefs = self.prefs();
        StrokePolicy::new(prefs.transform_stroke, prefs.preserve_transform)
    }

    /// Position of the geometric bbox handle matching the visual handle at `visual_handle`.
    fn geom_handle_pos(&self, visual_handle: Point) -> Point {
        let session = &self.session;
        let Some(bbox) = session.bbox else {
            return visual_handle;
        };
        match geom_handle_position(
            self.prefs().bounding_box,
            visual_handle,
            session.origin.for_bbox_points,
            &bbox,
            session.geometric_bbox.as_ref(),
            session.stroke_width,
            self.stroke_policy(),
        ) {
            Ok(position) => position,
            Err(err) => {
                tracing::trace!(%err, "using fallback geometric handle position");
                err.fallback()
            }
        }
    }

    /// Sets the absolute affine for `scale` around the origin, keeping the
    /// stroke right, and returns the handle position.
    fn calc_abs_affine_default(&mut self, scale: Scale) -> Point {
        let session = &self.session;
        let origin = session.origin.origin;
        let abs = Affine::scale(scale).about(origin);

        let absolute = match session.visual_bbox {
            Some(visual) => {
                let (stroke_x, stroke_y, policy) =
                    match (self.prefs().bounding_box, session.geometric_bbox) {
                        (BBoxType::Visual, Some(geometric)) => (
                            visual.width() - geometric.width(),
                            visual.height() - geometric.height(),
                            self.stroke_policy(),
                        ),
                        _ => (0.0, 0.0, StrokePolicy::default()),
                    };
                scale_transform_for_uniform_stroke(
                    &visual,
                    stroke_x,
                    stroke_y,
                    policy,
                    visual.min() * abs,
                    visual.max() * abs,
                )
            }
            None => abs,
        };

        let handle = (session.point - origin) * scale + origin;
        self.session.absolute_affine = absolute;
        handle
    }

    /// Sets the absolute affine for `scale` applied to the geometric bbox
    /// and returns where the visual handle ends up.
    fn calc_abs_affine_geom(&mut self, scale: Scale) -> Point {
        let origin = self.session.origin.for_special_points;
        let relative = Affine::scale(scale);
        let absolute = relative.about(origin);

        match (self.session.geometric_bbox, self.session.handle_fraction) {
            (Some(geometric), Some(fraction)) => {
                self.session.relative_affine = relative;
                self.session.absolute_affine = absolute;
                let visual = visual_bbox_for(
                    &geometric,
                    &absolute,
                    self.session.stroke_width,
                    self.prefs().transform_stroke,
                );
                visual.point_at(fraction)
            }
            _ => {
                tracing::warn!("No geometric bounding box to place the handle on");
                self.calc_abs_affine_default(scale)
            }
        }
    }

    /// Snaps `bbox` with the bounding-box candidates and `special` with the
    /// special points.
    fn snap_both(&mut self, bbox: &PureTransform, special: &PureTransform) -> (Snapped, Snapped) {
        let pointer = self.session.point;
        let sources = &self.session.sources;
        let snapper = &mut self.desktop.snapper;
        let bb = snapper.snap_transform(sources.bbox(), pointer, bbox);
        let sn = snapper.snap_transform(sources.special(), pointer, special);
        (bb, sn)
    }

    fn show_scale_status(&mut self) {
        let absolute = self.session.absolute_affine;
        let text = format!(
            "Scale: {:.2}% x {:.2}%; with Ctrl to lock ratio",
            100.0 * absolute[0],
            100.0 * absolute[3]
        );
        self.desktop.status.set(MessageLevel::Immediate, &text);
    }

    /// Applies the winning snap of a scale or stretch, or the unsnapped
    /// factors when nothing snapped.
    fn settle_scale(
        &mut self,
        pt: Point,
        default_scale: Scale,
        chosen: Option<ChosenSnap<Scale>>,
    ) -> Point {
        match chosen {
            Some(ChosenSnap::BBox(result)) => {
                self.desktop.indicator.set_target(&result.snapped);
                self.calc_abs_affine_default(result.value)
            }
            Some(ChosenSnap::Special(result)) => {
                self.desktop.indicator.set_target(&result.snapped);
                self.calc_abs_affine_geom(result.value)
            }
            None => {
                self.calc_abs_affine_default(default_scale);
                self.desktop.indicator.remove_target();
                pt
            }
        }
    }

    pub(super) fn scale_request(&mut self, pt: Point, modifiers: Modifiers) -> Option<Point> {
        let origins = self.session.origin;
        let mut default_scale = scale_factors(self.session.point, pt, origins.origin, false);
        let pt_geom = self.geom_handle_pos(pt);
        let mut geom_scale =
            scale_factors(self.session.point_geom, pt_geom, origins.for_special_points, false);

        self.session.absolute_affine = Affine::identity();

        let corrected = if modifiers.alt {
            self.calc_abs_affine_default(round_scale(default_scale))
        } else {
            let uniform = modifiers.ctrl || self.prefs().lock_aspect;
            if uniform {
                let dim = aspect_lock_axis(&default_scale);
                default_scale = lock_aspect(default_scale, dim);
                geom_scale = lock_aspect(geom_scale, dim);
            }

            let bb = PureTransform::Scale {
                factors: default_scale,
                origin: origins.for_bbox_points,
                uniform,
            };
            let sn = PureTransform::Scale {
                factors: geom_scale,
                origin: origins.for_special_points,
                uniform,
            };
            let (bb, sn) = self.snap_both(&bb, &sn);
            let chosen = choose_snap(
                bb.and_then(snapped_factors),
                sn.and_then(snapped_factors),
                None,
            );
            self.settle_scale(pt, default_scale, chosen)
        };

        self.show_scale_status();
        Some(corrected)
    }

    pub(super) fn stretch_request(
        &mut self,
        handle: &Handle,
        pt: Point,
        modifiers: Modifiers,
    ) -> Option<Point> {
        let Some(axis) = handle.axis else {
            tracing::warn!(handle = handle.name, "stretch handle without an axis");
            return None;
        };
        let perp = axis.other();
        let origins = self.session.origin;

        let mut default_scale = scale_factors(self.session.point, pt, origins.origin, false);
        default_scale[perp] = 1.0;
        let pt_geom = self.geom_handle_pos(pt);
        let mut geom_scale =
            scale_factors(self.session.point_geom, pt_geom, origins.for_special_points, false);
        geom_scale[perp] = 1.0;

        self.session.absolute_affine = Affine::identity();

        let corrected = if modifiers.alt {
            default_scale[axis] = round_to_integer_factor(default_scale[axis]);
            self.calc_abs_affine_default(default_scale)
        } else {
            let symmetrical = modifiers.ctrl;
            let bb = PureTransform::Stretch {
                magnitude: default_scale[axis],
                origin: origins.for_bbox_points,
                axis,
                symmetrical,
            };
            let sn = PureTransform::Stretch {
                magnitude: geom_scale[axis],
                origin: origins.for_special_points,
                axis,
                symmetrical,
            };
            let (bb, sn) = self.snap_both(&bb, &sn);

            if let Some(magnitude) = bb.and_then(|r| r.value.magnitude()) {
                default_scale[axis] = magnitude;
            }
            if let Some(magnitude) = sn.and_then(|r| r.value.magnitude()) {
                geom_scale[axis] = magnitude;
            }
            if symmetrical {
                // Never flip the axis that is not being dragged
                default_scale[perp] = default_scale[axis].abs();
                geom_scale[perp] = geom_scale[axis].abs();
            }

            let chosen = choose_snap(
                bb.map(|r| SnapResult {
                    value: default_scale,
                    snapped: r.snapped,
                }),
                sn.map(|r| SnapResult {
                    value: geom_scale,
                    snapped: r.snapped,
                }),
                None,
            );
            self.settle_scale(pt, default_scale, chosen)
        };

        self.show_scale_status();
        Some(corrected)
    }

    pub(super) fn skew_request(
        &mut self,
        handle: &Handle,
        pt: Point,
        modifiers: Modifiers,
    ) -> Option<Point> {
        // Top and bottom handles slide horizontally: the lever runs along Y
        // and points move along X.
        let Some(dim_a) = handle.axis else {
            tracing::warn!(handle = handle.name, "skew handle without an axis");
            return None;
        };
        let dim_b = dim_a.other();

        let origin = self.session.origin.origin;
        let point = self.session.point;
        let initial_delta = point - origin;

        if let Some(bbox) = self.session.bbox {
            let extent = bbox.extent(dim_a);
            if extent == 0.0 || (initial_delta[dim_a] / extent).abs() < SKEW_LEVER_EPSILON {
                return rejected(TransformError::degenerate("skew lever too short for the bbox"));
            }
        }
        if initial_delta[dim_a] == 0.0 {
            return rejected(TransformError::degenerate("skew handle on the origin axis"));
        }

        let mut scale = scale_factors(point, pt, origin, false);
        let mut skew = scale_factors(point, pt, origin, true);
        scale[dim_b] = 1.0;
        skew[dim_b] = 1.0;
        scale[dim_a] = skew_scale_factor(scale[dim_a]);

        let mut radians = (skew[dim_a] / scale[dim_a]).atan();

        if modifiers.ctrl {
            radians = snap_skew_angle(radians, self.prefs().rotation_snap_divisions);
            skew[dim_a] = radians.tan() * scale[dim_a];
        } else {
            // Bounding-box corners cannot follow a skew, only special points snap
            let sn = PureTransform::Skew {
                skew: skew[dim_a],
                scale: scale[dim_a],
                origin,
                direction: dim_b,
            };
            let snapped = self
                .desktop
                .snapper
                .snap_transform(self.session.sources.special(), point, &sn);
            match snapped {
                Some(result) => {
                    if let Some(value) = result.value.skew() {
                        skew[dim_a] = value;
                        radians = (skew[dim_a] / scale[dim_a]).atan();
                    }
                    self.desktop.indicator.set_target(&result.snapped);
                }
                None => self.desktop.indicator.remove_target(),
            }
        }

        let mut corrected = pt;
        corrected[dim_b] = initial_delta[dim_a] * skew[dim_a] + point[dim_b];
        corrected[dim_a] = initial_delta[dim_a] * scale[dim_a] + origin[dim_a];

        let (a, b) = (dim_a.index(), dim_b.index());
        let mut relative = Affine::identity();
        relative[2 * a + a] = (corrected[dim_a] - origin[dim_a]) / initial_delta[dim_a];
        relative[2 * a + b] = (corrected[dim_b] - point[dim_b]) / initial_delta[dim_a];
        relative[2 * b + a] = 0.0;
        relative[2 * b + b] = 1.0;
        for i in 0..2 {
            if relative[3 * i].abs() < MIN_DIAGONAL {
                relative[3 * i] = MIN_DIAGONAL;
            }
        }
        self.session.relative_affine = relative;

        let degrees = mod360_symmetric(radians.to_degrees());
        let text = format!("Skew: {degrees:.2}°; with Ctrl to snap angle");
        self.desktop.status.set(MessageLevel::Immediate, &text);
        Some(corrected)
    }

    pub(super) fn rotate_request(&mut self, pt: Point, modifiers: Modifiers) -> Option<Point> {
        let origin = self.session.origin.origin;
        let point = self.session.point;
        let d1 = point - origin;
        let d2 = pt - origin;

        if d1.length() < ROTATE_RADIUS_EPSILON || d2.length() < ROTATE_RADIUS_EPSILON {
            return rejected(TransformError::degenerate("rotate handle on the origin"));
        }

        let mut radians = d1.cross(&d2).atan2(d1.dot(&d2));

        if modifiers.ctrl {
            radians = snap_rotation_angle(radians, self.prefs().rotation_snap_divisions);
        } else {
            // Bounding-box corners do not stay on the bbox when rotated
            let prc = PureTransform::Rotate {
                angle: radians,
                origin,
            };
            let snapped = self
                .desktop
                .snapper
                .snap_transform(self.session.sources.special(), point, &prc);
            match snapped {
                Some(result) => {
                    if let Some(angle) = result.value.angle() {
                        radians = angle;
                    }
                    self.desktop.indicator.set_target(&result.snapped);
                }
                None => self.desktop.indicator.remove_target(),
            }
        }

        // Grab direction, then the same direction turned by the final angle.
        // Their quotient is a pure rotation up to rounding.
        let r1 = Affine::rotate_to(d1 / d1.length());
        let r2 = r1 * Affine::rotate(radians);
        let Some(r1_inverse) = r1.inverse() else {
            return rejected(TransformError::degenerate("rotate grab direction"));
        };
        let relative = r1_inverse * r2;
        self.session.relative_affine = relative;
        let corrected = point * relative.about(origin);

        let degrees = mod360_symmetric(radians.to_degrees());
        let text = format!("Rotate: {degrees:.2}°; with Ctrl to snap angle");
        self.desktop.status.set(MessageLevel::Immediate, &text);
        Some(corrected)
    }

    pub(super) fn center_request(&mut self, pt: Point, modifiers: Modifiers) -> Option<Point> {
        let ids: Vec<String> = self
            .session
            .items
            .iter()
            .map(|s| s.item.borrow().id().to_string())
            .collect();
        let snapper = &mut self.desktop.snapper;
        snapper.set_ignored_items(&[]);
        snapper.set_rotation_center_source(&ids);

        let candidate = SnapCandidatePoint::new(pt, SnapSourceType::RotationCenter);
        let snapped = if modifiers.ctrl {
            let constraints = [
                SnapConstraint::axis(self.session.point, Dim2::X),
                SnapConstraint::axis(self.session.point, Dim2::Y),
            ];
            let result = snapper.multiple_constrained_snaps(&candidate, &constraints, modifiers.shift);
            (result.point, result.snapped)
        } else if !modifiers.shift {
            match snapper.free_snap(&candidate) {
                Some(snapped) => (snapped.point, Some(snapped)),
                None => (pt, None),
            }
        } else {
            (pt, None)
        };

        let (corrected, target) = snapped;
        match target {
            Some(target) => self.desktop.indicator.set_target(&target),
            None => self.desktop.indicator.remove_target(),
        }

        let unit = self.prefs().display_unit;
        let text = format!(
            "Move center to {}, {}",
            format_length(corrected.x, unit),
            format_length(corrected.y, unit)
        );
        self.desktop.status.set(MessageLevel::Immediate, &text);
        Some(corrected)
    }

    /// Moves the grabbed selection so the grab point lands on `xy`.
    ///
    /// Ctrl restricts the move to the dominant axis, Alt moves by whole grid
    /// pitches and Shift disables snapping. Returns the applied offset.
    pub fn move_to(&mut self, xy: Point, modifiers: Modifiers) -> Result<Point> {
        if !self.session.grabbed {
            tracing::warn!("move without grab");
            return Err(TransformError::NotGrabbed.into());
        }

        let point = self.session.point;
        let mut dxy = xy - point;
        let dominant = if dxy.x.abs() > dxy.y.abs() {
            Dim2::X
        } else {
            Dim2::Y
        };

        if modifiers.alt {
            if modifiers.ctrl {
                dxy[dominant.other()] = 0.0;
            }
            dxy = self.desktop.snapper.multiple_of_grid_pitch(dxy, point);
        } else if modifiers.shift {
            if modifiers.ctrl {
                dxy[dominant.other()] = 0.0;
            }
        } else {
            let translate = PureTransform::Translate {
                delta: dxy,
                constraint: modifiers.ctrl.then_some(dominant),
            };
            let (bb, sn) = self.snap_both(&translate, &translate);
            let weight = if self.prefs().snap_closest_only {
                1.0
            } else {
                self.desktop.snapper.snap_weight()
            };
            match choose_snap(bb, sn, Some(weight)) {
                Some(chosen) => {
                    let result = chosen.result();
                    if let Some(delta) = result.value.delta() {
                        dxy = delta;
                    }
                    self.desktop.indicator.set_target(&result.snapped);
                }
                None => {
                    self.desktop.indicator.remove_target();
                    if modifiers.ctrl {
                        dxy[dominant.other()] = 0.0;
                    }
                }
            }
        }

        self.transform(&Affine::translate(dxy), Point::zero())?;

        let unit = self.prefs().display_unit;
        let text = format!(
            "Move by {}, {}; with Ctrl to restrict to horizontal/vertical; with Shift to disable snapping",
            format_length(dxy.x, unit),
            format_length(dxy.y, unit)
        );
        self.desktop.status.set(MessageLevel::Immediate, &text);
        Ok(dxy)
    }
}

fn snapped_factors(result: SnapResult<PureTransform>) -> Option<SnapResult<Scale>> {
    result.value.factors().map(|value| SnapResult {
        value,
        snapped: result.snapped,
    })
}
