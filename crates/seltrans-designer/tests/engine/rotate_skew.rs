use crate::support::*;
use seltrans_core::{Affine, Point};
use seltrans_designer::{HandleState, Modifiers};
use std::f64::consts::FRAC_PI_2;

fn rotating(f: &mut Fixture) {
    f.transformer.increase_state();
    assert_eq!(f.transformer.state(), HandleState::Rotate);
}

#[test]
fn test_quarter_turn_about_center() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    rotating(&mut f);
    let h = handle("rotate-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(25.0, 75.0), Modifiers::NONE)
        .expect("accepted");
    assert!(near(corrected, Point::new(25.0, 75.0)));
    assert_eq!(
        f.status().as_deref(),
        Some("Rotate: 90.00°; with Ctrl to snap angle")
    );
    f.transformer.handle_ungrab(h).expect("ungrab");

    let expected = Affine::rotate(FRAC_PI_2).about(Point::new(50.0, 25.0));
    assert!(affine_near(f.affine(0), expected));
    assert_eq!(f.undo_labels(), vec!["Rotate"]);
}

#[test]
fn test_ctrl_snaps_rotation_angle() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    rotating(&mut f);
    let h = handle("rotate-bottom-right");
    let center = Point::new(50.0, 25.0);

    f.transformer.handle_grab(h).expect("grab");
    let start = Point::new(100.0, 50.0);
    let pointer = start * Affine::rotate(40f64.to_radians()).about(center);
    let corrected = f
        .transformer
        .drag_handle(h, pointer, Modifiers::ctrl())
        .expect("accepted");

    let snapped = start * Affine::rotate(45f64.to_radians()).about(center);
    assert!(near(corrected, snapped));
    assert_eq!(
        f.status().as_deref(),
        Some("Rotate: 45.00°; with Ctrl to snap angle")
    );
}

#[test]
fn test_shift_rotates_around_opposite_corner() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    rotating(&mut f);
    let h = handle("rotate-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(-50.0, 100.0), Modifiers::shift())
        .expect("accepted");
    assert!(near(f.transformer.session().origins().origin, Point::zero()));
    f.transformer.handle_ungrab(h).expect("ungrab");

    // (100,50) -> (-50,100) about the origin is a quarter turn
    assert!(affine_near(f.affine(0), Affine::rotate(FRAC_PI_2)));
}

#[test]
fn test_skew_bottom_slides_horizontally() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    rotating(&mut f);
    let h = handle("skew-bottom");

    f.transformer.handle_grab(h).expect("grab");
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(60.0, 50.0), Modifiers::NONE)
        .expect("accepted");
    assert!(near(corrected, Point::new(60.0, 50.0)));
    assert_eq!(
        f.status().as_deref(),
        Some("Skew: 21.80°; with Ctrl to snap angle")
    );
    f.transformer.handle_ungrab(h).expect("ungrab");

    let mut skew = Affine::identity();
    skew[2] = 0.4;
    let expected = skew.about(Point::new(50.0, 25.0));
    assert!(affine_near(f.affine(0), expected));
    assert_eq!(f.undo_labels(), vec!["Skew"]);
}

#[test]
fn test_skew_without_lever_is_rejected() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    rotating(&mut f);
    f.transformer.set_center(Point::new(0.0, 10.0));
    let h = handle("skew-left");

    f.transformer.handle_grab(h).expect("grab");
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(0.0, 40.0), Modifiers::NONE);
    assert!(corrected.is_none());
    f.transformer.handle_ungrab(h).expect("ungrab");
    assert!(f.affine(0).is_identity());
    assert!(f.undo_labels().is_empty());
}

#[test]
fn test_rotate_with_handle_on_center_is_rejected() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    rotating(&mut f);
    f.transformer.set_center(Point::new(100.0, 50.0));
    let h = handle("rotate-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(25.0, 75.0), Modifiers::NONE);
    assert!(corrected.is_none());
    f.transformer.handle_ungrab(h).expect("ungrab");
    assert!(f.affine(0).is_identity());
}
