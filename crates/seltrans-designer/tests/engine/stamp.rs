use crate::support::*;
use seltrans_core::{Affine, Point, Scale, ShowMode};
use seltrans_designer::Modifiers;

fn three_items() -> Fixture {
    Fixture::new(plain_config(), vec![rect("a"), rect("b"), rect("c")])
}

#[test]
fn test_stamp_copies_in_document_order() {
    let mut f = three_items();
    let selection = vec![f.items[2].clone(), f.items[0].clone()];
    f.transformer.select(selection);

    let copies = f.transformer.stamp().expect("stamped");
    assert_eq!(copies, 2);
    assert_eq!(
        f.drawing.borrow().ids(),
        vec!["a-copy1", "a", "b", "c-copy2", "c"]
    );
    assert_eq!(f.undo_labels(), vec!["Stamp"]);
}

#[test]
fn test_stamp_with_empty_selection_does_nothing() {
    let mut f = three_items();
    f.transformer.select(Vec::new());
    assert_eq!(f.transformer.stamp().expect("no-op"), 0);
    assert_eq!(f.drawing.borrow().len(), 3);
    assert!(f.undo_labels().is_empty());
}

#[test]
fn test_stamp_during_drag_keeps_current_transform() {
    let mut f = Fixture::new(plain_config(), vec![rect("a")]);
    f.transformer.set_center(Point::new(10.0, 10.0));
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(200.0, 100.0), Modifiers::NONE)
        .expect("accepted");
    assert_eq!(f.transformer.stamp().expect("stamped"), 1);

    let copy = f.drawing.borrow().get("a-copy1").expect("copy");
    assert!(affine_near(copy.borrow().affine(), Affine::scale(Scale::new(2.0, 2.0))));
    assert!(near(
        copy.borrow().center().expect("center"),
        Point::new(20.0, 20.0)
    ));

    // the copy is not part of the selection and stays put
    f.transformer
        .drag_handle(h, Point::new(300.0, 150.0), Modifiers::NONE)
        .expect("accepted");
    f.transformer.handle_ungrab(h).expect("ungrab");
    assert!(affine_near(copy.borrow().affine(), Affine::scale(Scale::new(2.0, 2.0))));
    assert!(affine_near(f.affine(0), Affine::scale(Scale::new(3.0, 3.0))));
    assert_eq!(f.undo_labels(), vec!["Stamp", "Scale"]);
}

#[test]
fn test_stamp_in_outline_mode_applies_pending_transform() {
    let mut config = plain_config();
    config.transform.show = ShowMode::Outline;
    let mut f = Fixture::new(config, vec![rect("a")]);
    let h = handle("scale-bottom-right");

    f.transformer.handle_grab(h).expect("grab");
    f.transformer
        .drag_handle(h, Point::new(200.0, 100.0), Modifiers::NONE)
        .expect("accepted");
    f.transformer.stamp().expect("stamped");

    assert!(f.affine(0).is_identity());
    let copy = f.drawing.borrow().get("a-copy1").expect("copy");
    assert!(affine_near(copy.borrow().affine(), Affine::scale(Scale::new(2.0, 2.0))));
}
