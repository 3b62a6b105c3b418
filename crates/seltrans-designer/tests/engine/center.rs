use crate::support::*;
use seltrans_core::Point;
use seltrans_designer::{Modifiers, SelectionTransformer};

#[test]
fn test_dragging_center_sets_it_on_every_item() {
    let mut f = Fixture::new(plain_config(), vec![rect("a"), rect("b")]);
    let h = SelectionTransformer::center_handle();

    f.transformer.handle_grab(h).expect("grab");
    assert!(near(f.transformer.session().grab_point(), Point::new(50.0, 25.0)));
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(70.0, 30.0), Modifiers::NONE)
        .expect("accepted");
    assert!(near(corrected, Point::new(70.0, 30.0)));
    assert_eq!(
        f.status().as_deref(),
        Some("Move center to 70.000 px, 30.000 px")
    );
    f.transformer.handle_ungrab(h).expect("ungrab");

    for item in &f.items {
        let item = item.borrow();
        assert!(item.is_center_set());
        assert!(near(item.center().expect("center"), Point::new(70.0, 30.0)));
        assert!(item.affine().is_identity());
    }
    assert_eq!(f.undo_labels(), vec!["Set center"]);
    assert_eq!(f.transformer.resolve_center(), Some(Point::new(70.0, 30.0)));
}

#[test]
fn test_ctrl_keeps_center_on_an_axis() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    let h = SelectionTransformer::center_handle();

    f.transformer.handle_grab(h).expect("grab");
    let corrected = f
        .transformer
        .drag_handle(h, Point::new(70.0, 28.0), Modifiers::ctrl())
        .expect("accepted");
    assert!(near(corrected, Point::new(70.0, 25.0)));

    let corrected = f
        .transformer
        .drag_handle(h, Point::new(52.0, 5.0), Modifiers::ctrl())
        .expect("accepted");
    assert!(near(corrected, Point::new(50.0, 5.0)));
}

#[test]
fn test_shift_click_resets_center() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    f.transformer.set_center(Point::new(5.0, 5.0));
    assert!(f.items[0].borrow().is_center_set());

    let h = SelectionTransformer::center_handle();
    assert!(!f.transformer.handle_click(h, Modifiers::NONE));
    assert!(f.items[0].borrow().is_center_set());

    assert!(f.transformer.handle_click(h, Modifiers::shift()));
    assert!(!f.items[0].borrow().is_center_set());
    assert_eq!(f.undo_labels(), vec!["Reset center"]);
    assert_eq!(f.transformer.resolve_center(), Some(Point::new(50.0, 25.0)));
}

#[test]
fn test_click_on_other_handles_does_nothing() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    assert!(!f
        .transformer
        .handle_click(handle("scale-top-left"), Modifiers::shift()));
    assert!(f.undo_labels().is_empty());
}

#[test]
fn test_center_follows_a_committed_rotation() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    f.transformer.set_center(Point::new(100.0, 50.0));
    f.transformer.increase_state();
    let h = handle("rotate-top-left");

    // rotating about the bottom-right corner leaves the center in place
    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(150.0, -50.0), Modifiers::NONE)
        .expect("accepted");
    f.transformer.handle_ungrab(h).expect("ungrab");

    let center = f.items[0].borrow().center().expect("center");
    assert!(near(center, Point::new(100.0, 50.0)));
    assert_eq!(f.undo_labels(), vec!["Rotate"]);
}
