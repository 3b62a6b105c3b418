use crate::support::*;
use seltrans_core::{Affine, Error, Point, Rect, Scale, ShowMode, TransformError};
use seltrans_designer::{DrawingItem, Modifiers};

#[test]
fn test_double_grab_is_rejected() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    f.transformer
        .grab(Point::new(10.0, 10.0), None, true, true)
        .expect("first grab");
    let err = f
        .transformer
        .grab(Point::new(10.0, 10.0), None, true, true)
        .unwrap_err();
    assert!(matches!(err, Error::Transform(TransformError::AlreadyGrabbed)));
    assert!(f.transformer.is_grabbed());
}

#[test]
fn test_ungrab_without_grab_is_rejected() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let err = f.transformer.ungrab().unwrap_err();
    assert!(matches!(err, Error::Transform(TransformError::NotGrabbed)));
    assert!(f.undo_labels().is_empty());
}

#[test]
fn test_drag_back_to_start_commits_nothing() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(100.0, 50.0), Modifiers::NONE)
        .expect("accepted");
    f.transformer.handle_ungrab(h).expect("ungrab");

    assert!(f.affine(0).is_identity());
    assert!(f.undo_labels().is_empty());
    assert!(f.transformer.last_applied().is_none());
    assert!(!f.transformer.is_grabbed());
}

#[test]
fn test_status_is_cleared_on_release() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(150.0, 75.0), Modifiers::NONE)
        .expect("accepted");
    assert!(f.status().is_some());
    f.transformer.handle_ungrab(h).expect("ungrab");
    assert!(f.status().is_none());
}

#[test]
fn test_removed_item_stops_updates() {
    let mut f = Fixture::new(plain_config(), vec![rect("a"), rect("b")]);
    f.transformer
        .grab(Point::zero(), None, true, true)
        .expect("grab");

    let removed = f.items[1].clone();
    assert!(f.drawing.borrow_mut().remove(&removed));

    let err = f
        .transformer
        .transform(&Affine::translate(Point::new(5.0, 0.0)), Point::zero())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Transform(TransformError::StaleItem { ref id }) if id == "b"
    ));
    assert!(f.affine(0).is_identity());
}

#[test]
fn test_root_item_is_skipped_with_a_warning() {
    let root = DrawingItem::rect("svg", Rect::new(0.0, 0.0, 100.0, 50.0)).as_root();
    let mut f = Fixture::new(plain_config(), vec![root, rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(200.0, 100.0), Modifiers::NONE)
        .expect("accepted");

    assert!(f.affine(0).is_identity());
    assert!(affine_near(f.affine(1), Affine::scale(Scale::new(2.0, 2.0))));
    let flashed = f.status.borrow().flashed().to_vec();
    assert!(flashed
        .iter()
        .any(|(_, text)| text == "Cannot transform an embedded SVG."));

    f.transformer.handle_ungrab(h).expect("ungrab");
    assert!(f.affine(0).is_identity());
}

#[test]
fn test_outline_mode_defers_the_write_back() {
    let mut config = plain_config();
    config.transform.show = ShowMode::Outline;
    let mut f = Fixture::new(config, vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(200.0, 100.0), Modifiers::NONE)
        .expect("accepted");

    assert!(f.affine(0).is_identity());
    let outline = f.transformer.markers().outline.expect("outline shown");
    assert!(outline
        .iter()
        .any(|(from, _)| near(*from, Point::new(200.0, 100.0))));

    f.transformer.handle_ungrab(h).expect("ungrab");
    assert!(affine_near(f.affine(0), Affine::scale(Scale::new(2.0, 2.0))));
    assert!(f.transformer.markers().outline.is_none());
    assert_eq!(f.undo_labels(), vec!["Scale"]);
}

#[test]
fn test_empty_selection_has_no_handles() {
    let mut f = Fixture::new(plain_config(), vec![]);
    assert!(f.transformer.is_empty());
    assert!(f.transformer.visible_handles().is_empty());
    assert!(f.transformer.handle_grab(handle("scale-top-left")).is_err());
}

#[test]
fn test_selection_change_mid_drag_keeps_grabbed_items() {
    let mut config = plain_config();
    config.transform.show = ShowMode::Outline;
    let mut f = Fixture::new(config, vec![rect("a"), rect("b")]);
    f.transformer.select(vec![f.items[0].clone()]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(200.0, 100.0), Modifiers::NONE)
        .expect("accepted");
    f.transformer.select(vec![f.items[1].clone()]);
    f.transformer.handle_ungrab(h).expect("ungrab");

    assert!(affine_near(f.affine(0), Affine::scale(Scale::new(2.0, 2.0))));
    assert!(f.affine(1).is_identity());
    assert_eq!(f.undo_labels(), vec!["Scale"]);
}

#[test]
fn test_center_drag_only_moves_grabbed_centers() {
    let mut f = Fixture::new(plain_config(), vec![rect("a"), rect("b")]);
    f.transformer.select(vec![f.items[0].clone()]);
    let h = seltrans_designer::SelectionTransformer::center_handle();

    f.transformer.handle_grab(h).expect("grab");
    f.transformer.select(vec![f.items[1].clone()]);
    f.transformer
        .drag_handle(h, Point::new(70.0, 30.0), Modifiers::NONE)
        .expect("accepted");
    f.transformer.handle_ungrab(h).expect("ungrab");

    assert!(f.items[0].borrow().is_center_set());
    assert!(!f.items[1].borrow().is_center_set());
    assert_eq!(f.undo_labels(), vec!["Set center"]);
}
