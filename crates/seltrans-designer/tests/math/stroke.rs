use proptest::prelude::*;
use seltrans_core::{Affine, BBoxType, Point, Rect};
use seltrans_designer::stroke::{
    geom_handle_position, scale_transform_for_uniform_stroke, visual_bbox_for, ReconcileError,
    StrokePolicy,
};

fn near(a: Point, b: Point, tolerance: f64) -> bool {
    a.distance_to(&b) < tolerance
}

fn any_policy() -> impl Strategy<Value = StrokePolicy> {
    (any::<bool>(), any::<bool>()).prop_map(|(t, p)| StrokePolicy::new(t, p))
}

proptest! {
    #[test]
    fn prop_unstroked_box_lands_on_target(
        x0 in -100.0f64..100.0, y0 in -100.0f64..100.0,
        w0 in 1.0f64..500.0, h0 in 1.0f64..500.0,
        nx in -100.0f64..100.0, ny in -100.0f64..100.0,
        w1 in 0.5f64..500.0, h1 in 0.5f64..500.0,
        flip_x in any::<bool>(), flip_y in any::<bool>(),
        policy in any_policy(),
    ) {
        let visual = Rect::new(x0, y0, x0 + w0, y0 + h0);
        let new_min = Point::new(nx, ny);
        let new_max = Point::new(
            nx + if flip_x { -w1 } else { w1 },
            ny + if flip_y { -h1 } else { h1 },
        );

        let abs = scale_transform_for_uniform_stroke(&visual, 0.0, 0.0, policy, new_min, new_max);

        prop_assert!(near(visual.min() * abs, new_min, 1e-6));
        prop_assert!(near(visual.max() * abs, new_max, 1e-6));
    }

    #[test]
    fn prop_unstroked_geometric_handle_matches_visual(
        ox in -100.0f64..100.0, oy in -100.0f64..100.0,
        dx in 1.0f64..300.0, dy in 1.0f64..300.0,
    ) {
        let bbox = Rect::new(0.0, 0.0, 100.0, 50.0);
        let origin = Point::new(ox, oy);
        let handle = Point::new(ox + dx, oy + dy);

        let pos = geom_handle_position(
            BBoxType::Visual,
            handle,
            origin,
            &bbox,
            Some(&bbox),
            0.0,
            StrokePolicy::new(true, false),
        );
        let pos = pos.expect("non-degenerate drag");
        prop_assert!(near(pos, handle, 1e-6));
    }
}

#[test]
fn test_stroke_round_trip_through_geometric_box() {
    // A stroked box scaled with fixed stroke: the geometric box grown back
    // by the same stroke is the dragged visual box.
    let visual = Rect::new(-1.0, -1.0, 11.0, 11.0);
    let geometric = Rect::new(0.0, 0.0, 10.0, 10.0);
    let policy = StrokePolicy::new(false, false);
    let abs = scale_transform_for_uniform_stroke(
        &visual,
        2.0,
        2.0,
        policy,
        Point::new(-1.0, -1.0),
        Point::new(31.0, 21.0),
    );

    let regrown = visual_bbox_for(&geometric, &abs, 2.0, false);
    assert!(near(regrown.min(), Point::new(-1.0, -1.0), 1e-9));
    assert!(near(regrown.max(), Point::new(31.0, 21.0), 1e-9));
}

#[test]
fn test_geometric_handle_for_doubled_stroked_box() {
    // Visual box doubled about its min corner: [-1, 23]. With the stroke
    // kept, the geometric corner stays one half-stroke inside it.
    let visual = Rect::new(-1.0, -1.0, 11.0, 11.0);
    let geometric = Rect::new(0.0, 0.0, 10.0, 10.0);
    let origin = Point::new(-1.0, -1.0);
    let handle = Point::new(23.0, 23.0);

    let pos = geom_handle_position(
        BBoxType::Visual,
        handle,
        origin,
        &visual,
        Some(&geometric),
        2.0,
        StrokePolicy::new(false, false),
    )
    .expect("non-degenerate drag");
    assert!(near(pos, Point::new(22.0, 22.0), 1e-9));

    let new_geometric = Rect::new(0.0, 0.0, pos.x, pos.y);
    let regrown = visual_bbox_for(&new_geometric, &Affine::identity(), 2.0, false);
    assert!(near(regrown.max(), handle, 1e-9));
}

#[test]
fn test_geometric_handle_falls_back_without_geometric_box() {
    let visual = Rect::new(-1.0, -1.0, 11.0, 11.0);
    let handle = Point::new(23.0, 23.0);

    let err = geom_handle_position(
        BBoxType::Visual,
        handle,
        Point::new(-1.0, -1.0),
        &visual,
        None,
        2.0,
        StrokePolicy::new(false, false),
    )
    .unwrap_err();
    assert_eq!(err, ReconcileError::MissingGeometricBBox { fallback: handle });
    assert_eq!(err.fallback(), handle);
}

#[test]
fn test_geometric_handle_on_collapsed_drag_keeps_a_finite_fallback() {
    let visual = Rect::new(-1.0, -1.0, 11.0, 11.0);
    let geometric = Rect::new(0.0, 0.0, 10.0, 10.0);

    let err = geom_handle_position(
        BBoxType::Visual,
        Point::new(23.0, -1.0),
        Point::new(-1.0, -1.0),
        &visual,
        Some(&geometric),
        2.0,
        StrokePolicy::new(false, false),
    )
    .unwrap_err();
    assert!(matches!(err, ReconcileError::ZeroExtent { .. }));
    assert!(err.fallback().is_finite());
}

#[test]
fn test_identity_keeps_visual_box() {
    let geometric = Rect::new(0.0, 0.0, 10.0, 10.0);
    let visual = visual_bbox_for(&geometric, &Affine::identity(), 4.0, true);
    assert_eq!(visual, Rect::new(-2.0, -2.0, 12.0, 12.0));
}
