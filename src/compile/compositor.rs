//! Project to [`RenderPlan`] compilation.
//!
//! Compilation is total: every project produces a plan. Resolution misses degrade to visual
//! defaults (empty text, placeholder fills) and are logged, never returned as errors.

use std::sync::{PoisonError, RwLock};

use kurbo::Shape;

use crate::{
    assets::cache::ImageSource,
    binding::provider::{ContentProvider, resolve_binding},
    compile::{
        icons::{icon_outline, icon_placement},
        plan::{BackdropPass, Blur, DrawOp, ImageDraw, NoisePass, Paint, Pass, RenderPlan, ScenePass},
        text::layout_text,
    },
    foundation::core::{Affine, BezPath, Circle, PixelSize, Point, Rect, RoundedRect},
    model::{
        element::{Element, ShapeElement, ShapeFill, ShapeKind},
        layout::ResolvedFrame,
        project::{Project, WidgetSize},
    },
    paint::{
        background::{Background, ContentMode, GlassBackground, ImageBackground, PatternBackground},
        color::Color,
    },
    pattern::generator::{PatternPrimitive, PatternShape, generate_for},
};

const PATH_TOLERANCE: f64 = 0.1;

/// Output pixels per canvas point when rendering a `widget` at `size`.
///
/// Point-based values (font sizes, icon sizes, radii, blur) are multiplied by this.
pub fn unit_scale(widget: WidgetSize, size: PixelSize) -> f64 {
    let (w, h) = widget.canvas_size();
    let s = (f64::from(size.width) / w).min(f64::from(size.height) / h);
    if s.is_finite() && s > 0.0 { s } else { 1.0 }
}

/// Compile `project` for a `size` render.
///
/// Binding values are read from `content` on every call; images are looked up in `images`
/// without blocking.
#[tracing::instrument(
    skip_all,
    fields(project = %project.id, width = size.width, height = size.height)
)]
pub fn compile_project(
    project: &Project,
    size: PixelSize,
    content: &dyn ContentProvider,
    images: &dyn ImageSource,
) -> RenderPlan {
    let mut b = PlanBuilder::default();
    let canvas = size.rect();
    if size.is_empty() {
        return b.finish(size);
    }
    let unit = unit_scale(project.widget_size, size);

    compile_background(&project.background, canvas, unit, images, &mut b);

    for layer in project.layers_in_render_order() {
        if !layer.is_visible {
            tracing::trace!(layer = %layer.name, "hidden layer skipped");
            continue;
        }
        let opacity = layer.effective_opacity() as f32;
        if opacity <= 0.0 {
            continue;
        }
        let frame = layer.frame.resolve(size);
        if frame.is_degenerate() {
            tracing::trace!(layer = %layer.name, "zero-area layer skipped");
            continue;
        }
        compile_element(&layer.element, &frame, unit, opacity, content, &mut b);
    }

    let plan = b.finish(size);
    tracing::debug!(passes = plan.passes.len(), ops = plan.draw_ops().count(), "plan compiled");
    plan
}

/// Compile while holding a read lock, so editors cannot mutate the project mid-render.
pub fn compile_shared(
    project: &RwLock<Project>,
    size: PixelSize,
    content: &dyn ContentProvider,
    images: &dyn ImageSource,
) -> RenderPlan {
    let guard = project.read().unwrap_or_else(PoisonError::into_inner);
    compile_project(&guard, size, content, images)
}

#[derive(Default)]
struct PlanBuilder {
    passes: Vec<Pass>,
    ops: Vec<DrawOp>,
}

impl PlanBuilder {
    fn op(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    fn pass(&mut self, pass: Pass) {
        self.flush();
        self.passes.push(pass);
    }

    fn flush(&mut self) {
        if !self.ops.is_empty() {
            let ops = std::mem::take(&mut self.ops);
            self.passes.push(Pass::Scene(ScenePass { ops }));
        }
    }

    fn finish(mut self, size: PixelSize) -> RenderPlan {
        self.flush();
        RenderPlan {
            size,
            passes: self.passes,
        }
    }

    fn fill(&mut self, path: BezPath, paint: Paint) {
        self.op(DrawOp::Fill {
            path,
            transform: Affine::IDENTITY,
            paint,
            opacity: 1.0,
        });
    }

    fn stroke(&mut self, path: BezPath, paint: Paint, width: f64) {
        self.op(DrawOp::Stroke {
            path,
            transform: Affine::IDENTITY,
            paint,
            width,
            opacity: 1.0,
        });
    }
}

fn unit_interval(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

fn compile_background(
    bg: &Background,
    canvas: Rect,
    unit: f64,
    images: &dyn ImageSource,
    b: &mut PlanBuilder,
) {
    match bg {
        Background::Solid { color, opacity } => {
            let color = color.multiply_alpha(unit_interval(*opacity));
            b.fill(canvas.to_path(PATH_TOLERANCE), Paint::Solid(color));
        }
        Background::Gradient { gradient } => {
            if gradient.stops.is_empty() {
                tracing::debug!("gradient background without stops");
                return;
            }
            b.fill(
                canvas.to_path(PATH_TOLERANCE),
                Paint::Gradient(gradient.resolve(canvas)),
            );
        }
        Background::Image(image) => compile_image_background(image, canvas, unit, images, b),
        Background::Glass(glass) => compile_glass(glass, canvas, unit, b),
        Background::Pattern(pattern) => compile_pattern(pattern, canvas, unit, b),
    }
}

fn compile_image_background(
    bg: &ImageBackground,
    canvas: Rect,
    unit: f64,
    images: &dyn ImageSource,
    b: &mut PlanBuilder,
) {
    match images.image(&bg.reference) {
        Some(image) => {
            let dest = place_image(
                f64::from(image.width),
                f64::from(image.height),
                canvas,
                bg.content_mode,
            );
            let brightness = if bg.brightness.is_finite() {
                bg.brightness.clamp(-1.0, 1.0)
            } else {
                0.0
            };
            let saturation = if bg.saturation.is_finite() {
                bg.saturation.max(0.0)
            } else {
                1.0
            };
            b.op(DrawOp::Image(ImageDraw {
                image,
                dest,
                blur: Blur::from_radius(bg.blur * unit),
                brightness: brightness as f32,
                saturation: saturation as f32,
                opacity: unit_interval(bg.opacity) as f32,
            }));
        }
        None => {
            tracing::warn!(reference = %bg.reference, "image not available, drawing placeholder");
            b.fill(canvas.to_path(PATH_TOLERANCE), Paint::Placeholder);
        }
    }
    if bg.overlay.alpha() > 0.0 {
        b.fill(canvas.to_path(PATH_TOLERANCE), Paint::Solid(bg.overlay));
    }
}

/// Destination of a `w`x`h` image on `canvas` for a content mode, centered.
pub fn place_image(w: f64, h: f64, canvas: Rect, mode: ContentMode) -> Rect {
    if w <= 0.0 || h <= 0.0 {
        return canvas;
    }
    let sx = canvas.width() / w;
    let sy = canvas.height() / h;
    let s = match mode {
        ContentMode::Stretch => return canvas,
        ContentMode::Fill => sx.max(sy),
        ContentMode::Fit => sx.min(sy),
    };
    Rect::from_center_size(canvas.center(), (w * s, h * s))
}

/// Frosted base: tint, then speckle, then blur over both so `blurRadius` sets how soft the
/// material looks. The edge highlight is drawn last and stays crisp.
fn compile_glass(glass: &GlassBackground, canvas: Rect, unit: f64, b: &mut PlanBuilder) {
    let tint = glass
        .tint_color
        .multiply_alpha(unit_interval(glass.tint_opacity));
    if tint.alpha() > 0.0 {
        b.fill(canvas.to_path(PATH_TOLERANCE), Paint::Solid(tint));
    }

    let noise = unit_interval(glass.noise_opacity);
    if noise > 0.0 {
        b.pass(Pass::Noise(NoisePass {
            opacity: noise as f32,
        }));
    }

    if let Some(blur) = Blur::from_radius(glass.blur_radius * unit) {
        b.pass(Pass::Backdrop(BackdropPass { blur }));
    }

    let width = if glass.border_width.is_finite() {
        glass.border_width.max(0.0) * unit
    } else {
        0.0
    };
    let border = Color::white().multiply_alpha(unit_interval(glass.border_opacity));
    if width > 0.0 && border.alpha() > 0.0 {
        let edge = canvas.inset(-width * 0.5);
        b.stroke(edge.to_path(PATH_TOLERANCE), Paint::Solid(border), width);
    }
}

fn compile_pattern(bg: &PatternBackground, canvas: Rect, unit: f64, b: &mut PlanBuilder) {
    b.fill(canvas.to_path(PATH_TOLERANCE), Paint::Solid(bg.base_color));
    for prim in generate_for(bg, canvas.size(), unit) {
        b.op(pattern_op(prim));
    }
}

fn segment(from: Point, to: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(from);
    p.line_to(to);
    p
}

fn pattern_op(prim: PatternPrimitive) -> DrawOp {
    let paint = Paint::Solid(prim.color);
    let (path, stroke) = match prim.shape {
        PatternShape::Line { from, to, width } => (segment(from, to), Some(width)),
        PatternShape::Dot { center, radius } => {
            (Circle::new(center, radius).to_path(PATH_TOLERANCE), None)
        }
        PatternShape::Ring {
            center,
            radius,
            width,
        } => (Circle::new(center, radius).to_path(PATH_TOLERANCE), Some(width)),
        PatternShape::Cross {
            center,
            arm,
            thickness,
        } => {
            let mut p = Rect::from_center_size(center, (arm * 2.0, thickness)).to_path(PATH_TOLERANCE);
            p.extend(Rect::from_center_size(center, (thickness, arm * 2.0)).to_path(PATH_TOLERANCE));
            (p, None)
        }
        PatternShape::Polyline { path, width } => (path, Some(width)),
    };
    match stroke {
        Some(width) => DrawOp::Stroke {
            path,
            transform: Affine::IDENTITY,
            paint,
            width,
            opacity: 1.0,
        },
        None => DrawOp::Fill {
            path,
            transform: Affine::IDENTITY,
            paint,
            opacity: 1.0,
        },
    }
}

fn compile_element(
    element: &Element,
    frame: &ResolvedFrame,
    unit: f64,
    opacity: f32,
    content: &dyn ContentProvider,
    b: &mut PlanBuilder,
) {
    let rect = frame.rect;
    let transform = frame.transform();
    match element {
        Element::Text(t) => {
            let run = layout_text(t.content.clone(), &t.style, rect, unit, transform, opacity);
            b.op(DrawOp::Text(run));
        }
        Element::DataBinding(d) => {
            let value = resolve_binding(&d.key, content);
            let run = layout_text(value, &d.style, rect, unit, transform, opacity);
            b.op(DrawOp::Text(run));
        }
        Element::Icon(icon) => {
            let side = if icon.size.is_finite() {
                icon.size.max(0.0) * unit
            } else {
                0.0
            };
            if side <= 0.0 {
                return;
            }
            b.op(DrawOp::Fill {
                path: icon_outline(&icon.symbol),
                transform: transform * icon_placement(rect, side),
                paint: Paint::Solid(icon.color),
                opacity,
            });
        }
        Element::Shape(shape) => compile_shape(shape, rect, unit, transform, opacity, b),
    }
}

fn compile_shape(
    shape: &ShapeElement,
    rect: Rect,
    unit: f64,
    transform: Affine,
    opacity: f32,
    b: &mut PlanBuilder,
) {
    let paint = match &shape.fill {
        ShapeFill::Solid { color } => Paint::Solid(*color),
        ShapeFill::Gradient { gradient } if gradient.stops.is_empty() => {
            tracing::debug!("shape gradient without stops");
            return;
        }
        ShapeFill::Gradient { gradient } => Paint::Gradient(gradient.resolve(rect)),
    };
    let min_side = rect.width().min(rect.height());

    let path = match shape.kind {
        ShapeKind::Rectangle => rect.to_path(PATH_TOLERANCE),
        ShapeKind::RoundedRectangle => {
            let r = if shape.corner_radius.is_finite() {
                (shape.corner_radius * unit).clamp(0.0, min_side * 0.5)
            } else {
                0.0
            };
            RoundedRect::from_rect(rect, r).to_path(PATH_TOLERANCE)
        }
        ShapeKind::Circle => Circle::new(rect.center(), min_side * 0.5).to_path(PATH_TOLERANCE),
        ShapeKind::Line => {
            let width = if shape.stroke_width.is_finite() {
                shape.stroke_width.max(0.0) * unit
            } else {
                0.0
            };
            if width <= 0.0 {
                return;
            }
            let y = rect.center().y;
            b.op(DrawOp::Stroke {
                path: segment(Point::new(rect.x0, y), Point::new(rect.x1, y)),
                transform,
                paint,
                width,
                opacity,
            });
            return;
        }
    };
    b.op(DrawOp::Fill {
        path,
        transform,
        paint,
        opacity,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compositor.rs"]
mod tests;
