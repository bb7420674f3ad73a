use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    compile::plan::{BackdropPass, DrawOp, ImageDraw, NoisePass, Paint, RenderPlan, ScenePass},
    foundation::{
        core::{Affine, BezPath, PixelSize, Rect},
        error::{LayerkitError, LayerkitResult},
    },
    render::{
        backend::{FrameRGBA, PassBackend, RenderBackend, RenderSettings},
        blur::{blur_in_place, blur_rgba8_premul},
        composite::{fill, over_in_place},
        raster::{TextRasterizer, adjust_image, apply_noise, rasterize_gradient},
    },
};

/// CPU backend: each scene pass is drawn with `vello_cpu` into a transparent layer that is
/// then composited over the accumulated frame.
pub struct CpuBackend {
    settings: RenderSettings,
    text: Option<TextRasterizer>,
    frame: Option<CpuFrame>,
}

struct CpuFrame {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl CpuFrame {
    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("settings", &self.settings)
            .field("fonts_loaded", &self.text.is_some())
            .finish()
    }
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            text: None,
            frame: None,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn take_frame(&mut self) -> LayerkitResult<CpuFrame> {
        self.frame
            .take()
            .ok_or_else(|| LayerkitError::render("frame was not initialized; call begin first"))
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        width: u16,
        height: u16,
    ) -> LayerkitResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::Fill {
                path,
                transform,
                paint,
                opacity,
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                self.apply_paint(ctx, paint, path_bounds(path, 0.0))?;
                with_opacity(ctx, *opacity, |ctx| ctx.fill_path(&bezpath_to_cpu(path)));
                Ok(())
            }
            DrawOp::Stroke {
                path,
                transform,
                paint,
                width: stroke_width,
                opacity,
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*stroke_width));
                self.apply_paint(ctx, paint, path_bounds(path, *stroke_width * 0.5))?;
                with_opacity(ctx, *opacity, |ctx| ctx.stroke_path(&bezpath_to_cpu(path)));
                Ok(())
            }
            DrawOp::Text(run) => {
                let font_dirs = &self.settings.font_dirs;
                let rasterizer = self
                    .text
                    .get_or_insert_with(|| TextRasterizer::new(font_dirs));
                let bytes = rasterizer.rasterize(run, u32::from(width), u32::from(height))?;
                draw_canvas_layer(ctx, &bytes, width, height, run.opacity)
            }
            DrawOp::Image(draw) => {
                if draw.image.is_empty() {
                    return Ok(());
                }
                let bytes = render_image_layer(draw, width, height)?;
                draw_canvas_layer(ctx, &bytes, width, height, draw.opacity)
            }
        }
    }

    fn apply_paint(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        paint: &Paint,
        bounds: Rect,
    ) -> LayerkitResult<()> {
        match paint {
            Paint::Solid(color) => {
                let [r, g, b, a] = color.to_rgba8_straight();
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            }
            Paint::Placeholder => {
                let [r, g, b, a] = self.settings.placeholder.to_rgba8_straight();
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            }
            Paint::Gradient(gradient) => {
                let (iw, ih, bytes) = rasterize_gradient(gradient, bounds);
                let pixmap = pixmap_from_premul_bytes(&bytes, iw, ih)?;
                ctx.set_paint(image_paint(pixmap));
                let placement = Affine::translate(bounds.origin().to_vec2())
                    * Affine::scale_non_uniform(
                        bounds.width().max(f64::EPSILON) / f64::from(iw),
                        bounds.height().max(f64::EPSILON) / f64::from(ih),
                    );
                ctx.set_paint_transform(affine_to_cpu(placement));
            }
        }
        Ok(())
    }
}

impl PassBackend for CpuBackend {
    fn begin(&mut self, size: PixelSize) -> LayerkitResult<()> {
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| LayerkitError::render("frame width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| LayerkitError::render("frame height exceeds u16"))?;

        let mut frame = match self.frame.take() {
            Some(f) if f.width == width && f.height == height => f,
            _ => CpuFrame {
                width,
                height,
                data: vec![0; size.rgba8_len()],
            },
        };
        fill(&mut frame.data, self.settings.clear_premul());
        self.frame = Some(frame);
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(ops = pass.ops.len()))]
    fn exec_scene(&mut self, pass: &ScenePass) -> LayerkitResult<()> {
        let mut frame = self.take_frame()?;
        if frame.is_empty() || pass.ops.is_empty() {
            self.frame = Some(frame);
            return Ok(());
        }

        let mut ctx = vello_cpu::RenderContext::new(frame.width, frame.height);
        let mut result = Ok(());
        for op in &pass.ops {
            result = self.draw_op(&mut ctx, op, frame.width, frame.height);
            if result.is_err() {
                break;
            }
        }
        if result.is_ok() {
            ctx.flush();
            let mut layer = vello_cpu::Pixmap::new(frame.width, frame.height);
            ctx.render_to_pixmap(&mut layer);
            result = over_in_place(&mut frame.data, layer.data_as_u8_slice(), 1.0);
        }
        self.frame = Some(frame);
        result
    }

    fn exec_backdrop(&mut self, pass: &BackdropPass) -> LayerkitResult<()> {
        let mut frame = self.take_frame()?;
        let result = blur_in_place(
            &mut frame.data,
            u32::from(frame.width),
            u32::from(frame.height),
            pass.blur,
        );
        self.frame = Some(frame);
        result
    }

    fn exec_noise(&mut self, pass: &NoisePass) -> LayerkitResult<()> {
        let frame = self
            .frame
            .as_mut()
            .ok_or_else(|| LayerkitError::render("frame was not initialized; call begin first"))?;
        apply_noise(
            &mut frame.data,
            u32::from(frame.width),
            self.settings.noise_seed,
            pass.opacity,
        );
        Ok(())
    }

    fn readback_rgba8(&mut self, plan: &RenderPlan) -> LayerkitResult<FrameRGBA> {
        let frame = self
            .frame
            .as_ref()
            .ok_or_else(|| LayerkitError::render("frame was not initialized; call begin first"))?;
        Ok(FrameRGBA {
            width: plan.size.width,
            height: plan.size.height,
            data: frame.data.clone(),
            premultiplied: true,
        })
    }
}

impl RenderBackend for CpuBackend {}

fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f32,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    let layered = opacity < 1.0;
    if layered {
        ctx.push_opacity_layer(opacity.max(0.0));
    }
    draw(ctx);
    if layered {
        ctx.pop_layer();
    }
}

/// Draw a canvas-sized premultiplied buffer 1:1 into the scene.
fn draw_canvas_layer(
    ctx: &mut vello_cpu::RenderContext,
    bytes: &[u8],
    width: u16,
    height: u16,
    opacity: f32,
) -> LayerkitResult<()> {
    let pixmap = pixmap_from_premul_bytes(bytes, u32::from(width), u32::from(height))?;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(image_paint(pixmap));
    with_opacity(ctx, opacity, |ctx| {
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
    });
    Ok(())
}

/// Place the image into `dest` on a transparent canvas, then blur and adjust it there so
/// the blur radius is in output pixels.
fn render_image_layer(draw: &ImageDraw, width: u16, height: u16) -> LayerkitResult<Vec<u8>> {
    let image: &PreparedImage = &draw.image;
    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    let placement = Affine::translate(draw.dest.origin().to_vec2())
        * Affine::scale_non_uniform(draw.dest.width() / iw, draw.dest.height() / ih);
    ctx.set_transform(affine_to_cpu(placement));
    ctx.set_paint(image_paint(pixmap));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    ctx.flush();
    let mut layer = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut layer);

    let (w, h) = (u32::from(width), u32::from(height));
    let mut bytes = match draw.blur {
        Some(blur) => blur_rgba8_premul(layer.data_as_u8_slice(), w, h, blur)?,
        None => layer.data_as_u8_slice().to_vec(),
    };
    adjust_image(&mut bytes, draw.brightness, draw.saturation);
    Ok(bytes)
}

fn path_bounds(path: &BezPath, pad: f64) -> Rect {
    use kurbo::Shape;
    let pad = if pad.is_finite() { pad.max(0.0) } else { 0.0 };
    path.bounding_box().inflate(pad, pad)
}

fn image_paint(pixmap: vello_cpu::Pixmap) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> LayerkitResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| LayerkitError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| LayerkitError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != (width as usize) * (height as usize) * 4 {
        return Err(LayerkitError::render("premultiplied pixel buffer length mismatch"));
    }

    let mut translucent = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            translucent |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        translucent,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
