use crate::support::*;
use seltrans_core::{Affine, Point, Scale};
use seltrans_designer::{HandleKind, Modifiers, UndoLabel};

#[test]
fn test_scale_corner_drag_doubles_selection() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    assert!(near(f.transformer.session().grab_point(), Point::new(100.0, 50.0)));

    let corrected = f
        .transformer
        .drag_handle(h, Point::new(200.0, 100.0), Modifiers::NONE)
        .expect("accepted");
    assert!(near(corrected, Point::new(200.0, 100.0)));
    assert!(affine_near(
        f.transformer.session().absolute_affine(),
        Affine::scale(Scale::new(2.0, 2.0))
    ));
    assert_eq!(
        f.status().as_deref(),
        Some("Scale: 200.00% x 200.00%; with Ctrl to lock ratio")
    );

    f.transformer.handle_ungrab(h).expect("ungrab");
    assert!(affine_near(f.affine(0), Affine::scale(Scale::new(2.0, 2.0))));
    assert_eq!(f.undo_labels(), vec!["Scale"]);
    let (label, _) = f.transformer.last_applied().expect("applied");
    assert_eq!(label, UndoLabel::Scale);
}

#[test]
fn test_shift_scales_around_center() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(150.0, 75.0), Modifiers::shift())
        .expect("accepted");
    assert!(near(
        f.transformer.session().origins().origin,
        Point::new(50.0, 25.0)
    ));
    f.transformer.handle_ungrab(h).expect("ungrab");

    let expected = Affine::scale(Scale::new(2.0, 2.0)).about(Point::new(50.0, 25.0));
    assert!(affine_near(f.affine(0), expected));
}

#[test]
fn test_alt_rounds_to_whole_factors() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(240.0, 130.0), Modifiers::alt())
        .expect("accepted");
    assert!(near(corrected, Point::new(200.0, 150.0)));
    f.transformer.handle_ungrab(h).expect("ungrab");

    assert!(affine_near(f.affine(0), Affine::scale(Scale::new(2.0, 3.0))));
}

#[test]
fn test_ctrl_locks_aspect_ratio() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(300.0, 60.0), Modifiers::ctrl())
        .expect("accepted");
    f.transformer.handle_ungrab(h).expect("ungrab");

    assert!(affine_near(f.affine(0), Affine::scale(Scale::new(1.2, 1.2))));
}

#[test]
fn test_stretch_only_changes_one_axis() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = handle("stretch-right");
    assert_eq!(h.kind, HandleKind::Stretch);

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(150.0, 40.0), Modifiers::NONE)
        .expect("accepted");
    f.transformer.handle_ungrab(h).expect("ungrab");

    assert!(affine_near(f.affine(0), Affine::scale(Scale::new(1.5, 1.0))));
}

#[test]
fn test_ctrl_stretch_is_symmetrical() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = handle("stretch-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(150.0, 40.0), Modifiers::ctrl())
        .expect("accepted");
    f.transformer.handle_ungrab(h).expect("ungrab");

    let expected = Affine::scale(Scale::new(1.5, 1.5)).about(Point::new(0.0, 25.0));
    assert!(affine_near(f.affine(0), expected));
}

#[test]
fn test_fixed_stroke_scale_keeps_stroke_width() {
    let mut config = plain_config();
    config.transform.bounding_box = seltrans_core::BBoxType::Visual;
    config.transform.transform_stroke = false;
    let item = seltrans_designer::DrawingItem::rect(
        "a",
        seltrans_core::Rect::new(0.0, 0.0, 10.0, 10.0),
    )
    .with_stroke(2.0);
    let mut f = Fixture::new(config, vec![item]);
    let h = handle("scale-bottom-right");

    // visual box is (-1,-1)..(11,11); drag its corner to (23,23)
    f.transformer.handle_grab(h).expect("grab");
    assert!(near(f.transformer.session().grab_point(), Point::new(11.0, 11.0)));
    f.transformer
        .drag_handle(h, Point::new(23.0, 23.0), Modifiers::NONE)
        .expect("accepted");
    f.transformer.handle_ungrab(h).expect("ungrab");

    let affine = f.affine(0);
    assert!(near(Point::zero() * affine, Point::zero()));
    assert!(near(Point::new(10.0, 10.0) * affine, Point::new(22.0, 22.0)));
}
