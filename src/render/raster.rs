//! CPU pixel producers used by the backend: gradient fills, image adjustments, speckle
//! noise and text runs.

use std::{fmt::Write as _, sync::Arc};

use crate::{
    assets::fonts,
    compile::plan::TextRun,
    foundation::{
        core::{Affine, Point, Rect},
        error::{LayerkitError, LayerkitResult},
        math::hash_unit,
    },
    model::element::TextAlignment,
    paint::gradient::ResolvedGradient,
};

/// Largest gradient raster edge; bigger areas are sampled more coarsely and scaled up.
pub const MAX_GRADIENT_RASTER: u32 = 2048;

/// Gradient sampled over `area`, one sample at each pixel center.
///
/// Returns `(width, height, premultiplied rgba8)`; the raster maps onto `area` with
/// `translate(area.origin) * scale(area.width / width, area.height / height)`.
pub fn rasterize_gradient(gradient: &ResolvedGradient, area: Rect) -> (u32, u32, Vec<u8>) {
    let iw = raster_extent(area.width());
    let ih = raster_extent(area.height());
    let sx = area.width().max(f64::EPSILON) / f64::from(iw);
    let sy = area.height().max(f64::EPSILON) / f64::from(ih);

    let mut out = Vec::with_capacity((iw as usize) * (ih as usize) * 4);
    for j in 0..ih {
        for i in 0..iw {
            let p = Point::new(
                area.x0 + (f64::from(i) + 0.5) * sx,
                area.y0 + (f64::from(j) + 0.5) * sy,
            );
            out.extend_from_slice(&gradient.color_at(p).to_rgba8_premul());
        }
    }
    (iw, ih, out)
}

fn raster_extent(len: f64) -> u32 {
    if len.is_finite() && len > 0.0 {
        (len.ceil() as u32).clamp(1, MAX_GRADIENT_RASTER)
    } else {
        1
    }
}

/// Brightness offset then saturation scale on premultiplied pixels.
pub fn adjust_image(buf: &mut [u8], brightness: f32, saturation: f32) {
    let brightness = if brightness.is_finite() {
        brightness.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let saturation = if saturation.is_finite() {
        saturation.max(0.0)
    } else {
        1.0
    };
    if brightness == 0.0 && saturation == 1.0 {
        return;
    }

    for px in buf.chunks_exact_mut(4) {
        let a = f32::from(px[3]);
        if a == 0.0 {
            continue;
        }
        let mut rgb = [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])];
        for c in &mut rgb {
            *c += brightness * a;
        }
        let luma = 0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2];
        for (dst, c) in px.iter_mut().zip(rgb) {
            let v = luma + (c - luma) * saturation;
            *dst = v.clamp(0.0, a).round() as u8;
        }
    }
}

/// Monochrome speckle keyed on `(seed, x, y)`. Alpha is untouched and color stays
/// within it, so the buffer remains valid premultiplied data.
pub fn apply_noise(buf: &mut [u8], width: u32, seed: u64, opacity: f32) {
    let strength = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if strength == 0.0 || width == 0 {
        return;
    }
    for (i, px) in buf.chunks_exact_mut(4).enumerate() {
        let a = f32::from(px[3]);
        if a == 0.0 {
            continue;
        }
        let (x, y) = ((i as u32) % width, (i as u32) / width);
        let n = (hash_unit(seed, x, y) as f32 - 0.5) * 2.0;
        let delta = n * strength * a;
        for c in &mut px[..3] {
            *c = (f32::from(*c) + delta).clamp(0.0, a).round() as u8;
        }
    }
}

/// Text rasterizer over a font database loaded once and reused across runs.
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl TextRasterizer {
    pub fn new(font_dirs: &[std::path::PathBuf]) -> Self {
        Self {
            fontdb: fonts::build_fontdb(font_dirs),
        }
    }

    /// Rasterize `run` into a canvas-sized premultiplied buffer, with the run's transform
    /// applied. Opacity is left to the caller.
    #[tracing::instrument(skip_all, fields(lines = run.lines.len()))]
    pub fn rasterize(&self, run: &TextRun, width: u32, height: u32) -> LayerkitResult<Vec<u8>> {
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| LayerkitError::render("failed to allocate text pixmap"))?;
        if run.lines.iter().all(|l| l.text.trim().is_empty()) {
            return Ok(pixmap.data().to_vec());
        }

        let svg = text_run_svg(run, width, height);
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: fonts::make_font_resolver(),
            ..Default::default()
        };
        let tree = match usvg::Tree::from_str(&svg, &opts) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::warn!(%err, "text run could not be laid out");
                return Ok(pixmap.data().to_vec());
            }
        };
        resvg::render(&tree, skia_transform(run.transform), &mut pixmap.as_mut());
        Ok(pixmap.data().to_vec())
    }
}

fn skia_transform(a: Affine) -> resvg::tiny_skia::Transform {
    let [sx, ky, kx, sy, tx, ty] = a.as_coeffs();
    resvg::tiny_skia::Transform::from_row(
        sx as f32, ky as f32, kx as f32, sy as f32, tx as f32, ty as f32,
    )
}

/// One `<text>` element per wrapped line, in local (pre-transform) coordinates.
pub(crate) fn text_run_svg(run: &TextRun, width: u32, height: u32) -> String {
    let anchor = match run.alignment {
        TextAlignment::Leading => "start",
        TextAlignment::Center => "middle",
        TextAlignment::Trailing => "end",
    };
    let [r, g, b, _] = run.color.to_rgba8_straight();
    let style = if run.font.italic { "italic" } else { "normal" };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for line in &run.lines {
        if line.text.is_empty() {
            continue;
        }
        let _ = write!(
            svg,
            r##"<text x="{x}" y="{y}" text-anchor="{anchor}" font-family="{family}" font-size="{size}" font-weight="{weight}" font-style="{style}" letter-spacing="{spacing}" fill="#{r:02X}{g:02X}{b:02X}" fill-opacity="{alpha}" xml:space="preserve">{text}</text>"##,
            x = line.x,
            y = line.baseline,
            family = escape_xml(&run.font.family_list()),
            size = run.font.size,
            weight = run.font.weight.numeric(),
            spacing = run.letter_spacing,
            alpha = run.color.alpha(),
            text = escape_xml(&line.text),
        );
    }
    svg.push_str("</svg>");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
