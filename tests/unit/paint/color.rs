use super::*;

#[test]
fn channels_are_clamped_on_construction() {
    let c = Color::new(1.4, -0.3, 0.5, 2.0);
    assert_eq!(c.red(), 1.0);
    assert_eq!(c.green(), 0.0);
    assert_eq!(c.blue(), 0.5);
    assert_eq!(c.alpha(), 1.0);

    let nan = Color::new(f64::NAN, f64::INFINITY, 0.2, 0.2);
    assert_eq!(nan.red(), 0.0);
    assert_eq!(nan.green(), 0.0);
}

#[test]
fn deserialization_goes_through_clamp() {
    let c: Color = serde_json::from_str(r#"{"red":1.4,"green":0.5,"blue":-1}"#).unwrap();
    assert_eq!(c.red(), 1.0);
    assert_eq!(c.green(), 0.5);
    assert_eq!(c.blue(), 0.0);
    assert_eq!(c.alpha(), 1.0);
}

#[test]
fn hex_parse_and_format() {
    let c = Color::from_hex("#FF8000").unwrap();
    assert_eq!(c.to_rgba8_straight(), [255, 128, 0, 255]);
    assert_eq!(c.to_hex(), "#FF8000FF");

    let t = Color::from_hex("00000080").unwrap();
    assert_eq!(t.to_rgba8_straight()[3], 128);

    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#GG0000").is_err());
}

#[test]
fn premul_scales_rgb_by_alpha() {
    let c = Color::new(1.0, 0.5, 0.0, 0.5);
    assert_eq!(c.to_rgba8_premul(), [128, 64, 0, 128]);
}

#[test]
fn lerp_and_alpha_helpers() {
    let mid = Color::lerp(Color::black(), Color::white(), 0.5);
    assert!((mid.red() - 0.5).abs() < 1e-12);
    assert_eq!(Color::white().multiply_alpha(0.25).alpha(), 0.25);
    assert_eq!(Color::white().with_alpha(3.0).alpha(), 1.0);
}
