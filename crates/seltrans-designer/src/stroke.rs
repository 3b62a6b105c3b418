//! Stroke-aware bounding box reconciliation.
//!
//! The reference bounding box may be visual (stroke included) while snapping
//! of path nodes works on geometry. These functions translate between the
//! two so that both kinds of candidate points land where the pointer says.

use seltrans_core::{Affine, BBoxType, Point, Rect, Scale};
use thiserror::Error;

/// Stroke widths below this are treated as no stroke.
const STROKE_EPSILON: f64 = 1e-6;

/// How stroke width behaves while an object is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokePolicy {
    /// Stroke width scales together with the object
    pub transform_stroke: bool,
    /// Transforms are kept as-is rather than folded into geometry
    pub preserve: bool,
}

impl StrokePolicy {
    pub fn new(transform_stroke: bool, preserve: bool) -> Self {
        Self {
            transform_stroke,
            preserve,
        }
    }
}

/// Failure to map a visual handle position onto the geometric bounding box.
///
/// Both variants carry the best position available so callers can keep going.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ReconcileError {
    /// Visual mode without a geometric bounding box
    #[error("No geometric bounding box to reconcile against")]
    MissingGeometricBBox { fallback: Point },

    /// The dragged visual box collapsed on at least one axis; the fallback is
    /// only meaningful along the axes that kept their extent
    #[error("Dragged bounding box has zero extent")]
    ZeroExtent { fallback: Point },
}

impl ReconcileError {
    pub fn fallback(&self) -> Point {
        match self {
            ReconcileError::MissingGeometricBBox { fallback }
            | ReconcileError::ZeroExtent { fallback } => *fallback,
        }
    }
}

fn clean_stroke(width: f64) -> f64 {
    if !width.is_finite() || width.abs() < STROKE_EPSILON {
        0.0
    } else {
        width
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        1.0
    } else {
        numerator / denominator
    }
}

/// Affine taking the visual box `visual` onto the box spanned by `new_min`
/// and `new_max`, with stroke width handled according to `policy`.
///
/// `stroke_x` and `stroke_y` are the horizontal and vertical stroke
/// contributions to the visual box. The corner `new_min` may lie on either
/// side of `new_max`, which mirrors the result.
pub fn scale_transform_for_uniform_stroke(
    visual: &Rect,
    stroke_x: f64,
    stroke_y: f64,
    policy: StrokePolicy,
    new_min: Point,
    new_max: Point,
) -> Affine {
    let stroke_x = clean_stroke(stroke_x);
    let stroke_y = clean_stroke(stroke_y);

    let p2o = Affine::translate(-visual.min());
    let o2n = Affine::translate(new_min);

    let w0 = visual.width();
    let h0 = visual.height();
    let w1 = new_max.x - new_min.x;
    let h1 = new_max.y - new_min.y;
    let flip_x = if w1 > 0.0 { 1.0 } else { -1.0 };
    let flip_y = if h1 > 0.0 { 1.0 } else { -1.0 };
    let w1 = w1.abs();
    let h1 = h1.abs();

    if stroke_x < 0.0 || stroke_y < 0.0 {
        let scale = Scale::new(flip_x * ratio(w1, w0), flip_y * ratio(h1, h0));
        return p2o * Affine::scale(scale) * o2n;
    }

    let r0 = (stroke_x * stroke_y).sqrt();

    // a line whose stroke is its whole extent on both axes
    if (w0 - stroke_x).abs() < STROKE_EPSILON && (h0 - stroke_y).abs() < STROKE_EPSILON {
        return Affine::identity();
    }

    let mut scale_x = 1.0;
    let mut scale_y = 1.0;
    let mut unbudge = Affine::identity();

    if (w0 - stroke_x).abs() < STROKE_EPSILON || w1 == 0.0 {
        // vertical line
        scale_y = ratio(h1, h0);
        scale_x = if policy.transform_stroke { 1.0 } else { scale_y };
        unbudge *= Affine::translate(Point::new(-flip_x * 0.5 * (scale_x - 1.0) * w0, 0.0));
        unbudge *= Affine::translate(Point::new(flip_x * 0.5 * (w1 - w0), 0.0));
    } else if (h0 - stroke_y).abs() < STROKE_EPSILON || h1 == 0.0 {
        // horizontal line
        scale_x = ratio(w1, w0);
        scale_y = if policy.transform_stroke { 1.0 } else { scale_x };
        unbudge *= Affine::translate(Point::new(0.0, -flip_y * 0.5 * (scale_y - 1.0) * h0));
        unbudge *= Affine::translate(Point::new(0.0, flip_y * 0.5 * (h1 - h0)));
    } else if policy.transform_stroke && !policy.preserve {
        // Stroke scales with the square root of the geometric area ratio:
        // r1^2 * (w0 - r0) * (h0 - r0) = r0^2 * (w1 - r1) * (h1 - r1)
        let a = -w0 * h0 + r0 * (w0 + h0);
        let b = -(w1 + h1) * r0 * r0;
        let c = w1 * h1 * r0 * r0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            tracing::warn!(
                r0,
                w0,
                h0,
                w1,
                h1,
                "Stroke scaling has no real solution, keeping the original size"
            );
        } else {
            let r1 = if r0 == 0.0 {
                0.0
            } else if (a * c / b / b).abs() > seltrans_core::geometry::EPSILON {
                ((-b - discriminant.sqrt()) / (2.0 * a)).abs()
            } else {
                -c / b
            };
            scale_x = (w1 - r1) / (w0 - r0);
            scale_y = (h1 - r1) / (h0 - r0);
            unbudge *= Affine::translate(Point::new(
                -flip_x * 0.5 * (r0 * scale_x - r1),
                -flip_y * 0.5 * (r0 * scale_y - r1),
            ));
        }
    } else if !policy.transform_stroke && !policy.preserve {
        // stroke width stays fixed
        scale_x = (w1 - r0) / (w0 - r0);
        scale_y = (h1 - r0) / (h0 - r0);
        unbudge *= Affine::translate(Point::new(
            -flip_x * 0.5 * r0 * (scale_x - 1.0),
            -flip_y * 0.5 * r0 * (scale_y - 1.0),
        ));
    } else if !policy.transform_stroke && policy.preserve {
        // The stroke is scaled by the transform itself, so the geometric mean
        // of both stroke widths must come out unchanged.
        let a = h1 * (w0 - stroke_x);
        let b = h0 * stroke_x - w0 * stroke_y;
        let c = -w1 * (h0 - stroke_y);
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            tracing::warn!(
                stroke_x,
                stroke_y,
                w0,
                h0,
                w1,
                h1,
                "Stroke-preserving scale has no real solution, keeping the original size"
            );
        } else {
            let q = (-b + discriminant.sqrt()) / 2.0 / a;
            scale_x = (w1 - stroke_x * q) / (w0 - stroke_x);
            scale_y = (h1 - stroke_y / q) / (h0 - stroke_y);
            let shrink = 1.0 - (1.0 / (scale_x * scale_y)).sqrt();
            unbudge *= Affine::translate(Point::new(
                -flip_x * 0.5 * stroke_x * scale_x * shrink,
                -flip_y * 0.5 * stroke_y * scale_y * shrink,
            ));
        }
    } else {
        scale_x = ratio(w1, w0);
        scale_y = ratio(h1, h0);
    }

    p2o * Affine::scale(Scale::new(flip_x * scale_x, flip_y * scale_y)) * unbudge * o2n
}

/// Visual bounding box of `geometric` after `affine`, grown by half the stroke.
///
/// With `transform_stroke` the stroke is scaled by the square root of the
/// geometric area ratio.
pub fn visual_bbox_for(
    geometric: &Rect,
    affine: &Affine,
    stroke_width: f64,
    transform_stroke: bool,
) -> Rect {
    let mut new_geometric = Rect::from_points(geometric.corner(0) * *affine, geometric.corner(0) * *affine);
    for i in 1..4 {
        new_geometric.expand_to(geometric.corner(i) * *affine);
    }

    let mut visual = new_geometric;
    if stroke_width > 0.0 && stroke_width.is_finite() {
        let width = if transform_stroke && geometric.area() > 0.0 {
            stroke_width * (new_geometric.area() / geometric.area()).sqrt()
        } else {
            stroke_width
        };
        visual.expand_by(0.5 * width);
    }
    visual
}

/// Mean desktop stroke width of the stroked entries.
///
/// Each entry is an item's own stroke width (`None` when unstroked) and its
/// item-to-desktop affine. Returns 0 when nothing is stroked.
pub fn average_stroke_width<I>(strokes: I) -> f64
where
    I: IntoIterator<Item = (Option<f64>, Affine)>,
{
    let (total, count) = strokes
        .into_iter()
        .filter_map(|(width, affine)| width.map(|w| w * affine.descrim()))
        .fold((0.0, 0usize), |(sum, n), w| (sum + w, n + 1));

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Where a dragged visual handle puts the matching handle of the geometric
/// bounding box.
///
/// `handle` is the visual handle position and `origin` the fixed point the
/// visual box is scaled around. In geometric mode the handle is returned
/// unchanged.
pub fn geom_handle_position(
    mode: BBoxType,
    handle: Point,
    origin: Point,
    visual: &Rect,
    geometric: Option<&Rect>,
    stroke_width: f64,
    policy: StrokePolicy,
) -> Result<Point, ReconcileError> {
    if mode == BBoxType::Geometric {
        return Ok(handle);
    }
    let Some(geometric) = geometric else {
        return Err(ReconcileError::MissingGeometricBBox { fallback: handle });
    };

    let dragged = Rect::from_points(origin, handle);
    let dims = dragged.dimensions();
    let normalized = Point::new(
        if dims.x == 0.0 { 0.0 } else { (handle.x - dragged.min().x) / dims.x },
        if dims.y == 0.0 { 0.0 } else { (handle.y - dragged.min().y) / dims.y },
    );

    let abs = scale_transform_for_uniform_stroke(
        visual,
        stroke_width,
        stroke_width,
        policy,
        dragged.min(),
        dragged.max(),
    );
    let new_geometric = Rect::from_points(geometric.min() * abs, geometric.max() * abs);
    let position = new_geometric.min() + new_geometric.dimensions().scale_by(normalized);

    if dims.x == 0.0 || dims.y == 0.0 {
        Err(ReconcileError::ZeroExtent { fallback: position })
    } else {
        Ok(position)
    }
}
