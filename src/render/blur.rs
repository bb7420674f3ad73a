use crate::{
    compile::plan::Blur,
    foundation::error::{LayerkitError, LayerkitResult},
};

/// Separable gaussian blur over a premultiplied RGBA8 buffer.
///
/// Kernel weights are Q16 fixed point so results are bit-identical across platforms.
/// Samples past the edges repeat the border pixel.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    blur: Blur,
) -> LayerkitResult<Vec<u8>> {
    let expected = (width as usize) * (height as usize) * 4;
    if src.len() != expected {
        return Err(LayerkitError::render(format!(
            "blur input is {} bytes, expected {expected} for {width}x{height}",
            src.len()
        )));
    }
    if blur.radius_px == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = kernel_q16(blur.radius_px, blur.sigma);
    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];
    convolve(src, &mut tmp, width, height, &kernel, Axis::X);
    convolve(&tmp, &mut out, width, height, &kernel, Axis::Y);
    Ok(out)
}

/// In-place variant used on accumulated frames.
pub fn blur_in_place(buf: &mut [u8], width: u32, height: u32, blur: Blur) -> LayerkitResult<()> {
    let out = blur_rgba8_premul(buf, width, height, blur)?;
    buf.copy_from_slice(&out);
    Ok(())
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Normalized kernel of `2 * radius + 1` taps summing to exactly `1 << 16`.
fn kernel_q16(radius: u32, sigma: f32) -> Vec<u32> {
    let sigma = if sigma.is_finite() && sigma > 0.0 {
        f64::from(sigma)
    } else {
        f64::from(radius.max(1)) / 3.0
    };
    let r = radius as i64;
    let two_s2 = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_s2).exp())
        .collect();
    let total: f64 = weights.iter().sum();

    let mut q: Vec<u32> = weights
        .iter()
        .map(|w| ((w / total) * 65536.0).round() as u32)
        .collect();
    // Rounding drift goes to the center tap.
    let sum: i64 = q.iter().map(|&v| i64::from(v)).sum();
    let center = radius as usize;
    let fixed = i64::from(q[center]) + (65536 - sum);
    q[center] = fixed.max(0) as u32;
    q
}

fn convolve(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[u32], axis: Axis) {
    let (w, h) = (width as i64, height as i64);
    let radius = (kernel.len() / 2) as i64;
    let (len, lines) = match axis {
        Axis::X => (w, h),
        Axis::Y => (h, w),
    };
    let index = |line: i64, pos: i64| -> usize {
        let (x, y) = match axis {
            Axis::X => (pos, line),
            Axis::Y => (line, pos),
        };
        ((y * w + x) * 4) as usize
    };

    for line in 0..lines {
        for pos in 0..len {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let sample = (pos + k as i64 - radius).clamp(0, len - 1);
                let i = index(line, sample);
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(src[i + c]) * u64::from(weight);
                }
            }
            let o = index(line, pos);
            for (c, a) in acc.iter().enumerate() {
                dst[o + c] = (((a + 32768) >> 16).min(255)) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
