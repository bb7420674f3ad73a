use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    foundation::core::{Affine, BezPath, PixelSize, Rect},
    model::element::{FontDescriptor, TextAlignment},
    paint::{color::Color, gradient::ResolvedGradient},
};

/// Largest blur kernel half-width, in pixels.
pub const MAX_BLUR_RADIUS_PX: u32 = 256;

#[derive(Clone, Debug, PartialEq)]
/// Backend-agnostic render plan for one widget.
///
/// Passes run in order against a single accumulating frame:
/// - `Scene` draws its ops into a fresh transparent layer that is then composited over the frame
/// - `Backdrop` blurs the frame as rendered so far
/// - `Noise` adds deterministic speckle to the frame
pub struct RenderPlan {
    /// Output size.
    pub size: PixelSize,
    /// Ordered pass list to execute.
    pub passes: Vec<Pass>,
}

impl RenderPlan {
    /// Every draw op across all scene passes, in paint order.
    pub fn draw_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.passes
            .iter()
            .filter_map(|p| match p {
                Pass::Scene(s) => Some(&s.ops),
                Pass::Backdrop(_) | Pass::Noise(_) => None,
            })
            .flatten()
    }

    /// Every text run, in paint order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.draw_ops().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A single pass in a [`RenderPlan`].
pub enum Pass {
    Scene(ScenePass),
    Backdrop(BackdropPass),
    Noise(NoisePass),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenePass {
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Blur the frame rendered so far.
pub struct BackdropPass {
    pub blur: Blur,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Add monochrome speckle to the frame; alpha is left untouched.
pub struct NoisePass {
    /// Speckle strength in `[0, 1]`.
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Separable gaussian blur parameters.
pub struct Blur {
    /// Kernel half-width in pixels.
    pub radius_px: u32,
    pub sigma: f32,
}

impl Blur {
    /// Blur for a radius in output pixels; `None` when it would be a no-op.
    ///
    /// The radius is treated as two standard deviations.
    pub fn from_radius(radius: f64) -> Option<Self> {
        if !radius.is_finite() || radius < 0.5 {
            return None;
        }
        let sigma = radius * 0.5;
        let radius_px = ((sigma * 3.0).ceil() as u32).clamp(1, MAX_BLUR_RADIUS_PX);
        Some(Self {
            radius_px,
            sigma: sigma as f32,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Paint source for fills and strokes.
pub enum Paint {
    Solid(Color),
    /// Gradient in the op's local coordinates.
    Gradient(ResolvedGradient),
    /// Neutral stand-in for content that could not be resolved; the backend picks the color.
    Placeholder,
}

#[derive(Clone, Debug, PartialEq)]
/// Draw operation emitted by the compositor.
pub enum DrawOp {
    /// Fill path geometry (non-zero winding).
    Fill {
        /// Path geometry in local space.
        path: BezPath,
        /// Local-to-canvas transform.
        transform: Affine,
        paint: Paint,
        /// Opacity multiplier in `[0, 1]`.
        opacity: f32,
    },
    /// Stroke path geometry.
    Stroke {
        path: BezPath,
        transform: Affine,
        paint: Paint,
        /// Stroke width in local units.
        width: f64,
        opacity: f32,
    },
    Text(TextRun),
    Image(ImageDraw),
}

impl DrawOp {
    pub fn opacity(&self) -> f32 {
        match self {
            Self::Fill { opacity, .. } | Self::Stroke { opacity, .. } => *opacity,
            Self::Text(t) => t.opacity,
            Self::Image(i) => i.opacity,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One laid-out line of text.
pub struct TextLine {
    pub text: String,
    /// Horizontal anchor: left edge, center or right edge depending on alignment.
    pub x: f64,
    /// Baseline y in local space.
    pub baseline: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Resolved, wrapped text ready for glyph rasterization.
pub struct TextRun {
    /// Full resolved string before wrapping; empty for binding misses.
    pub text: String,
    pub lines: Vec<TextLine>,
    /// Font with `size` already in pixels.
    pub font: FontDescriptor,
    pub color: Color,
    pub alignment: TextAlignment,
    /// Extra advance per character, in pixels.
    pub letter_spacing: f64,
    /// Layer frame rectangle the text is laid out in.
    pub rect: Rect,
    pub transform: Affine,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
/// Raster image placement with per-draw adjustments.
///
/// Adjustments apply in order: blur, brightness, saturation, then the draw opacity.
pub struct ImageDraw {
    pub image: Arc<PreparedImage>,
    /// Where the full image lands on the canvas; may extend past it.
    pub dest: Rect,
    pub blur: Option<Blur>,
    /// Additive offset in `[-1, 1]`.
    pub brightness: f32,
    /// `1` is unchanged, `0` is grayscale.
    pub saturation: f32,
    pub opacity: f32,
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
