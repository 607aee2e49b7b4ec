use lasercam_camtools::CoordinateTransform;
use lasercam_core::{BoundingBox, Origin, Point};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sw_round_trip(x in 0.0f64..200.0, y in 0.0f64..100.0) {
        let bounds = BoundingBox::new(0.0, 0.0, 200.0, 100.0);
        let t = CoordinateTransform::new(Origin::Sw, bounds, 3);

        let machine = t.apply(Point::new(x, y));
        // sw is its own inverse
        let back = t.apply(machine);

        prop_assert!((back.x - x).abs() <= 0.0005 + 1e-9);
        prop_assert!((back.y - y).abs() <= 0.0005 + 1e-9);
    }
}

#[test]
fn test_center_maps_to_origin() {
    let bounds = BoundingBox::new(0.0, 0.0, 40.0, 30.0);
    let t = CoordinateTransform::new(Origin::C, bounds, 3);
    assert_eq!(t.apply(Point::new(20.0, 15.0)), Point::new(0.0, 0.0));
}

#[test]
fn test_unknown_origin_is_identity() {
    let bounds = BoundingBox::new(0.0, 0.0, 40.0, 30.0);
    let t = CoordinateTransform::new(Origin::from_name("nw"), bounds, 2);
    assert_eq!(t.apply(Point::new(1.234, 5.678)), Point::new(1.23, 5.68));
}
