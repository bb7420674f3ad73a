use super::*;
use crate::foundation::core::Point;

#[test]
fn every_symbol_parses_inside_the_design_box() {
    for (name, d) in SYMBOLS {
        let path = BezPath::from_svg(d).unwrap_or_else(|e| panic!("{name}: {e}"));
        let b = path.bounding_box();
        assert!(b.area() > 0.0, "{name} is empty");
        assert!(b.x0 >= 0.0 && b.y0 >= 0.0, "{name} starts outside the box");
        assert!(b.x1 <= ICON_BOX && b.y1 <= ICON_BOX, "{name} ends outside the box");
    }
}

#[test]
fn unknown_symbols_fall_back_to_circle() {
    assert!(path_data("unicorn.fill").is_none());
    assert_eq!(path_data("hands.sparkles.fill"), path_data("sparkle"));
    assert_ne!(icon_outline("hands.sparkles.fill"), icon_outline(FALLBACK_SYMBOL));
    assert_eq!(icon_outline("unicorn.fill"), icon_outline(FALLBACK_SYMBOL));
}

#[test]
fn placement_centers_the_box() {
    let xf = icon_placement(Rect::new(0.0, 0.0, 100.0, 50.0), 48.0);
    assert_eq!(xf * Point::new(0.0, 0.0), Point::new(26.0, 1.0));
    assert_eq!(xf * Point::new(24.0, 24.0), Point::new(74.0, 49.0));
}
