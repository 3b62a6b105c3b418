use crate::support::*;
use seltrans_core::{Affine, Point, Rect, Scale};
use seltrans_designer::{DrawingItem, Modifiers, PointSnapper, SelectionTransformer};

#[test]
fn test_scale_snaps_corner_to_grid() {
    let mut f = Fixture::new(grid_config(), vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    assert_eq!(f.transformer.session().sources().bbox().len(), 4);

    let corrected = f
        .transformer
        .drag_handle(h, Point::new(197.0, 98.0), Modifiers::NONE)
        .expect("accepted");
    assert!(near(corrected, Point::new(200.0, 100.0)));
    let target = f.indicator.borrow().target.expect("snap shown");
    assert!(near(target.point, Point::new(200.0, 100.0)));

    f.transformer.handle_ungrab(h).expect("ungrab");
    assert!(affine_near(f.affine(0), Affine::scale(Scale::new(2.0, 2.0))));
    assert!(f.indicator.borrow().source.is_none());
}

#[test]
fn test_translation_snaps_to_grid() {
    let mut f = Fixture::new(grid_config(), vec![rect("a")]);
    f.transformer
        .grab(Point::new(50.0, 25.0), None, true, true)
        .expect("grab");

    let delta = f
        .transformer
        .move_to(Point::new(58.0, 29.0), Modifiers::NONE)
        .expect("moved");
    assert!(near(delta, Point::new(10.0, 0.0)));
}

#[test]
fn test_special_points_are_capped() {
    let nodes: Vec<Point> = (0..500)
        .map(|i| Point::new(i as f64, (i % 7) as f64))
        .collect();
    let mut f = Fixture::new(grid_config(), vec![DrawingItem::new("dense", nodes)]);

    f.transformer
        .handle_grab(handle("scale-top-left"))
        .expect("grab");
    let sources = f.transformer.session().sources();
    assert_eq!(sources.special().len(), 200);
    assert_eq!(sources.bbox().len(), 4);
}

#[test]
fn test_closest_only_cycles_through_candidates() {
    let mut config = grid_config();
    config.transform.snap_closest_only = true;
    config.snapping.bbox_corners = false;
    let nodes = (1..=5).map(|i| Point::new(i as f64, 0.0)).collect();
    let mut f = Fixture::new(config, vec![DrawingItem::new("line", nodes)]);

    f.transformer
        .grab(Point::zero(), None, true, true)
        .expect("grab");
    let sources = f.transformer.session().sources();
    assert_eq!(sources.special().len(), 1);
    assert!(near(sources.special()[0].point, Point::new(1.0, 0.0)));

    let next = f.transformer.next_closest_point(false).expect("next");
    assert!(near(next.point, Point::new(2.0, 0.0)));
    assert!(near(
        f.indicator.borrow().source.expect("source shown").point,
        Point::new(2.0, 0.0)
    ));

    let back = f.transformer.next_closest_point(true).expect("previous");
    assert!(near(back.point, Point::new(1.0, 0.0)));
    let wrapped = f.transformer.next_closest_point(true).expect("wrapped");
    assert!(near(wrapped.point, Point::new(5.0, 0.0)));
}

#[test]
fn test_next_closest_point_needs_closest_only_mode() {
    let mut f = Fixture::new(grid_config(), vec![rect("a")]);
    f.transformer
        .grab(Point::zero(), None, true, true)
        .expect("grab");
    assert!(f.transformer.next_closest_point(false).is_none());
}

#[test]
fn test_center_skips_its_own_rotation_center() {
    let mut config = plain_config();
    config.snapping.enabled = true;
    let other = DrawingItem::rect("b", Rect::new(200.0, 0.0, 300.0, 50.0));
    let mut f = Fixture::new(config.clone(), vec![rect("a"), other]);

    let mut snapper = PointSnapper::new(config.snapping.clone());
    for item in &f.items {
        snapper.add_item_targets(item);
    }
    f.transformer.desktop_mut().snapper = Box::new(snapper);
    f.transformer.select(vec![f.items[0].clone()]);

    let h = SelectionTransformer::center_handle();
    f.transformer.handle_grab(h).expect("grab");
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(52.0, 27.0), Modifiers::NONE)
        .expect("accepted");
    assert!(near(corrected, Point::new(52.0, 27.0)));

    let corrected = f
        .transformer
        .drag_handle(h, Point::new(247.0, 24.0), Modifiers::NONE)
        .expect("accepted");
    assert!(near(corrected, Point::new(250.0, 25.0)));

    // Shift disables snapping
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(247.0, 24.0), Modifiers::shift())
        .expect("accepted");
    assert!(near(corrected, Point::new(247.0, 24.0)));
}
