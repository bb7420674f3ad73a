use super::*;

fn red() -> Color {
    Color::rgb(1.0, 0.0, 0.0)
}

fn blue() -> Color {
    Color::rgb(0.0, 0.0, 1.0)
}

#[test]
fn stop_location_is_clamped() {
    assert_eq!(GradientStop::new(red(), 1.5).location(), 1.0);
    assert_eq!(GradientStop::new(red(), -0.2).location(), 0.0);
    assert_eq!(GradientStop::new(red(), f64::NAN).location(), 0.0);

    let s: GradientStop =
        serde_json::from_str(r#"{"color":{"red":1,"green":0,"blue":0},"location":3}"#).unwrap();
    assert_eq!(s.location(), 1.0);
}

#[test]
fn sorted_stops_are_stable() {
    let g = Gradient::linear(vec![
        GradientStop::new(blue(), 1.0),
        GradientStop::new(red(), 0.5),
        GradientStop::new(Color::white(), 0.5),
    ]);
    let sorted = g.sorted_stops();
    assert_eq!(sorted[0].color(), red());
    assert_eq!(sorted[1].color(), Color::white());
    assert_eq!(sorted[2].color(), blue());
}

#[test]
fn single_stop_is_flat() {
    let stops = vec![GradientStop::new(red(), 0.3)];
    for t in [0.0, 0.3, 0.7, 1.0] {
        assert_eq!(sample_sorted(&stops, t), red());
    }
    assert_eq!(sample_sorted(&[], 0.5), Color::clear());
}

#[test]
fn linear_interpolates_between_anchors() {
    let g = Gradient::linear_between(&[red(), blue()], AnchorPoint::Leading, AnchorPoint::Trailing);
    let r = g.resolve(Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(r.color_at(Point::new(0.0, 25.0)), red());
    assert_eq!(r.color_at(Point::new(100.0, 10.0)), blue());
    let mid = r.color_at(Point::new(50.0, 0.0));
    assert!((mid.red() - 0.5).abs() < 1e-9);
    assert!((mid.blue() - 0.5).abs() < 1e-9);
}

#[test]
fn radial_reaches_end_color_at_half_max_dimension() {
    let g = Gradient::radial(&[red(), blue()], AnchorPoint::Center);
    let r = g.resolve(Rect::new(0.0, 0.0, 100.0, 40.0));
    assert_eq!(r.color_at(Point::new(50.0, 20.0)), red());
    assert_eq!(r.color_at(Point::new(100.0, 20.0)), blue());
}

#[test]
fn angular_angle_wraps() {
    let mut g = Gradient::angular(&[red(), blue()], AnchorPoint::Center, 450.0);
    assert_eq!(g.wrapped_angle_degrees(), 90.0);
    g.angle_degrees = -90.0;
    assert_eq!(g.wrapped_angle_degrees(), 270.0);

    g.angle_degrees = 0.0;
    let r = g.resolve(Rect::new(0.0, 0.0, 100.0, 100.0));
    // Directly right of center is the sweep start.
    assert!(r.param_at(Point::new(90.0, 50.0)).abs() < 1e-9);
    // Straight down is a quarter turn clockwise in y-down space.
    assert!((r.param_at(Point::new(50.0, 90.0)) - 0.25).abs() < 1e-9);
}

#[test]
fn anchors_cover_nine_points() {
    let rect = Rect::new(10.0, 20.0, 110.0, 220.0);
    assert_eq!(AnchorPoint::TopLeading.in_rect(rect), Point::new(10.0, 20.0));
    assert_eq!(AnchorPoint::Center.in_rect(rect), Point::new(60.0, 120.0));
    assert_eq!(
        AnchorPoint::BottomTrailing.in_rect(rect),
        Point::new(110.0, 220.0)
    );
}

#[test]
fn sample_sorts_before_interpolating() {
    let g = Gradient::linear(vec![
        GradientStop::new(blue(), 1.0),
        GradientStop::new(red(), 0.0),
    ]);
    assert_eq!(g.sample(0.0), red());
    assert_eq!(g.sample(2.0), blue());
    assert_eq!(g.sample(0.5), Color::lerp(red(), blue(), 0.5));
    assert_eq!(Gradient::linear(vec![]).sample(0.5), Color::clear());
}
