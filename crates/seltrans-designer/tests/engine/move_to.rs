use crate::support::*;
use seltrans_core::{Affine, Error, Point, TransformError};
use seltrans_designer::Modifiers;

fn grabbed(config: seltrans_settings::Config) -> Fixture {
    let mut f = Fixture::new(config, vec![rect("a")]);
    f.transformer
        .grab(Point::new(10.0, 10.0), None, true, true)
        .expect("grab");
    f
}

#[test]
fn test_move_follows_pointer() {
    let mut f = grabbed(plain_config());
    let delta = f
        .transformer
        .move_to(Point::new(30.0, 15.0), Modifiers::NONE)
        .expect("moved");
    assert!(near(delta, Point::new(20.0, 5.0)));

    // later moves replace earlier ones
    let delta = f
        .transformer
        .move_to(Point::new(40.0, 10.0), Modifiers::NONE)
        .expect("moved");
    assert!(near(delta, Point::new(30.0, 0.0)));
    f.transformer.ungrab().expect("ungrab");

    assert!(affine_near(f.affine(0), Affine::translate(Point::new(30.0, 0.0))));
    assert_eq!(f.undo_labels(), vec!["Move"]);
}

#[test]
fn test_ctrl_restricts_to_dominant_axis() {
    let mut f = grabbed(plain_config());
    let delta = f
        .transformer
        .move_to(Point::new(30.0, 15.0), Modifiers::ctrl())
        .expect("moved");
    assert!(near(delta, Point::new(20.0, 0.0)));
    assert_eq!(
        f.status().as_deref(),
        Some(
            "Move by 20.000 px, 0.000 px; with Ctrl to restrict to horizontal/vertical; \
             with Shift to disable snapping"
        )
    );

    let delta = f
        .transformer
        .move_to(Point::new(12.0, -20.0), Modifiers::ctrl())
        .expect("moved");
    assert!(near(delta, Point::new(0.0, -30.0)));
}

#[test]
fn test_alt_moves_by_whole_grid_pitches() {
    let mut f = grabbed(grid_config());
    let delta = f
        .transformer
        .move_to(Point::new(33.0, 17.0), Modifiers::alt())
        .expect("moved");
    assert!(near(delta, Point::new(20.0, 10.0)));
}

#[test]
fn test_shift_disables_snapping() {
    let mut f = grabbed(grid_config());
    let delta = f
        .transformer
        .move_to(Point::new(13.0, 12.0), Modifiers::shift())
        .expect("moved");
    assert!(near(delta, Point::new(3.0, 2.0)));
    assert!(f.indicator.borrow().target.is_none());
}

#[test]
fn test_move_requires_grab() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let err = f
        .transformer
        .move_to(Point::new(1.0, 1.0), Modifiers::NONE)
        .unwrap_err();
    assert!(matches!(err, Error::Transform(TransformError::NotGrabbed)));
}
