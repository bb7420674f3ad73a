use super::*;

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [200, 100, 50, 255], 1.0), [200, 100, 50, 255]);
}

#[test]
fn transparent_or_zero_opacity_keeps_destination() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
    assert_eq!(over(dst, [255, 255, 255, 255], 0.0), dst);
    assert_eq!(over(dst, [255, 255, 255, 255], f32::NAN), dst);
}

#[test]
fn half_opacity_blends() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    assert_eq!(out[3], 255);
    assert!((i32::from(out[0]) - 128).abs() <= 1, "{out:?}");
}

#[test]
fn over_onto_clear_keeps_premultiplied_source() {
    assert_eq!(over([0, 0, 0, 0], [64, 32, 0, 128], 1.0), [64, 32, 0, 128]);
}

#[test]
fn buffer_sizes_must_match() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    over_in_place(&mut dst, &[255u8; 8], 1.0).unwrap();
    assert_eq!(dst, vec![255u8; 8]);
}

#[test]
fn fill_writes_every_pixel() {
    let mut buf = vec![0u8; 12];
    fill(&mut buf, [1, 2, 3, 4]);
    assert_eq!(buf, [1, 2, 3, 4].repeat(3));
}
