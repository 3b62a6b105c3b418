use proptest::prelude::*;
use seltrans_core::{Dim2, Point};
use seltrans_designer::scale_math::{
    lock_aspect, round_to_integer_factor, scale_factors, snap_rotation_angle,
};
use std::f64::consts::PI;

proptest! {
    #[test]
    fn prop_scale_factors_take_initial_to_new(
        ix in -1000.0f64..1000.0, iy in -1000.0f64..1000.0,
        nx in -1000.0f64..1000.0, ny in -1000.0f64..1000.0,
        ox in -1000.0f64..1000.0, oy in -1000.0f64..1000.0,
    ) {
        prop_assume!((ix - ox).abs() > 1e-3 && (iy - oy).abs() > 1e-3);
        let initial = Point::new(ix, iy);
        let new = Point::new(nx, ny);
        let origin = Point::new(ox, oy);

        let scale = scale_factors(initial, new, origin, false);
        let moved = (initial - origin) * scale + origin;

        for dim in Dim2::ALL {
            let tolerance = 1e-6 * (1.0 + new[dim].abs() + origin[dim].abs());
            prop_assert!((moved[dim] - new[dim]).abs() < tolerance);
        }
    }

    #[test]
    fn prop_scale_factors_are_pure(
        ix in -100.0f64..100.0, iy in -100.0f64..100.0,
        nx in -100.0f64..100.0, ny in -100.0f64..100.0,
    ) {
        let initial = Point::new(ix, iy);
        let new = Point::new(nx, ny);
        let first = scale_factors(initial, new, Point::zero(), false);
        let second = scale_factors(initial, new, Point::zero(), false);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_integer_rounding_is_idempotent(factor in -50.0f64..50.0) {
        let once = round_to_integer_factor(factor);
        prop_assert_eq!(round_to_integer_factor(once), once);
    }

    #[test]
    fn prop_lock_aspect_equalizes_magnitudes(x in -10.0f64..10.0, y in -10.0f64..10.0) {
        use seltrans_core::Scale;
        let locked = lock_aspect(Scale::new(x, y), Dim2::X);
        prop_assert_eq!(locked.x.abs(), y.abs());
        prop_assert_eq!(locked.y, y);
    }

    #[test]
    fn prop_snapped_angle_is_a_multiple(angle in -PI..PI, divisions in 1u32..36) {
        let snapped = snap_rotation_angle(angle, divisions);
        let steps = snapped * f64::from(divisions) / PI;
        prop_assert!((steps - steps.round()).abs() < 1e-9);
        prop_assert!((snapped - angle).abs() <= PI / f64::from(divisions) / 2.0 + 1e-12);
    }
}

#[test]
fn test_skew_mode_uses_offset_on_other_axis() {
    let scale = scale_factors(
        Point::new(50.0, 50.0),
        Point::new(60.0, 50.0),
        Point::new(50.0, 25.0),
        true,
    );
    assert!((scale.y - 0.4).abs() < 1e-12);
    assert_eq!(scale.x, 1.0);
}
