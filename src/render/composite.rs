use crate::foundation::{
    error::{LayerkitError, LayerkitResult},
    math::mul_div255,
};

/// Premultiplied source-over of one pixel, with `src` scaled by `opacity` first.
pub fn over(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    let op = opacity_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }
    let src = if op == 255 {
        src
    } else {
        src.map(|c| mul_div255(u16::from(c), u16::from(op)))
    };
    let inv = 255 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for (o, (s, d)) in out.iter_mut().zip(src.iter().zip(dst.iter())) {
        *o = s.saturating_add(mul_div255(u16::from(*d), inv));
    }
    out
}

/// Composite a whole layer onto `dst`; both buffers are premultiplied RGBA8 of equal size.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> LayerkitResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(LayerkitError::render(
            "layer composite expects equal-length rgba8 buffers",
        ));
    }
    if opacity_u8(opacity) == 0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Fill a premultiplied buffer with one pixel value.
pub fn fill(buf: &mut [u8], px: [u8; 4]) {
    for d in buf.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

fn opacity_u8(opacity: f32) -> u8 {
    if opacity.is_finite() {
        (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
