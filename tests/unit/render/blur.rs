use super::*;

fn blur(radius_px: u32, sigma: f32) -> Blur {
    Blur { radius_px, sigma }
}

#[test]
fn zero_radius_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(blur_rgba8_premul(&src, 1, 2, blur(0, 1.0)).unwrap(), src);
}

#[test]
fn flat_image_is_unchanged() {
    let (w, h) = (6u32, 4u32);
    let src = [12u8, 40, 90, 200].repeat((w * h) as usize);
    assert_eq!(blur_rgba8_premul(&src, w, h, blur(3, 1.5)).unwrap(), src);
}

#[test]
fn single_pixel_spreads_and_keeps_energy() {
    let (w, h) = (7u32, 7u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((3 * w + 3) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, blur(2, 1.0)).unwrap();
    let covered = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(covered > 1);
    let total: i32 = out.chunks_exact(4).map(|px| i32::from(px[3])).sum();
    assert!((total - 255).abs() <= 6, "total alpha {total}");
}

#[test]
fn length_mismatch_is_a_render_error() {
    let err = blur_rgba8_premul(&[0u8; 7], 1, 2, blur(1, 1.0)).unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}

#[test]
fn kernel_sums_to_one_in_q16() {
    for (r, s) in [(1, 0.5f32), (4, 2.0), (12, 4.0), (3, f32::NAN)] {
        let k = kernel_q16(r, s);
        assert_eq!(k.len(), (2 * r + 1) as usize);
        assert_eq!(k.iter().map(|&v| u64::from(v)).sum::<u64>(), 65536);
    }
}

#[test]
fn in_place_matches_copying_variant() {
    let (w, h) = (5u32, 3u32);
    let src: Vec<u8> = (0..(w * h * 4)).map(|i| (i * 7 % 256) as u8).collect();
    let expected = blur_rgba8_premul(&src, w, h, blur(2, 1.0)).unwrap();
    let mut buf = src.clone();
    blur_in_place(&mut buf, w, h, blur(2, 1.0)).unwrap();
    assert_eq!(buf, expected);
}
