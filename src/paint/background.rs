use crate::{
    paint::{color::Color, gradient::Gradient},
    pattern::generator::{PatternKind, sanitize_scale},
};

/// The paint filling the whole canvas beneath every layer. Exactly one variant is active.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Background {
    /// Flat color.
    Solid {
        color: Color,
        #[serde(default = "one")]
        opacity: f64,
    },
    /// Multi-stop gradient over the full canvas.
    Gradient { gradient: Gradient },
    /// Externally stored photo or artwork.
    Image(ImageBackground),
    /// Frosted translucent panel.
    Glass(GlassBackground),
    /// Procedural tileable texture over a base fill.
    Pattern(PatternBackground),
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid {
            color: Color::white(),
            opacity: 1.0,
        }
    }
}

impl Background {
    /// Opaque solid fill.
    pub fn solid(color: Color) -> Self {
        Self::Solid {
            color,
            opacity: 1.0,
        }
    }

    /// Short variant tag, used for logging and catalog coverage checks.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Solid { .. } => "solid",
            Self::Gradient { .. } => "gradient",
            Self::Image(_) => "image",
            Self::Glass(_) => "glass",
            Self::Pattern(_) => "pattern",
        }
    }
}

fn one() -> f64 {
    1.0
}

/// How an image is scaled into the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentMode {
    /// Scale to cover the canvas, cropping overflow.
    #[default]
    Fill,
    /// Scale to fit inside the canvas, letterboxing.
    Fit,
    /// Stretch to exactly the canvas size, ignoring aspect ratio.
    Stretch,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBackground {
    /// Asset-store reference of the image.
    pub reference: String,
    #[serde(default)]
    pub content_mode: ContentMode,
    /// Gaussian blur radius in canvas points.
    #[serde(default)]
    pub blur: f64,
    /// Color painted over the image; its alpha is the overlay strength.
    #[serde(default = "Color::clear")]
    pub overlay: Color,
    /// Additive brightness offset in `[-1, 1]`.
    #[serde(default)]
    pub brightness: f64,
    /// Saturation multiplier; `1` leaves colors unchanged, `0` is grayscale.
    #[serde(default = "one")]
    pub saturation: f64,
    #[serde(default = "one")]
    pub opacity: f64,
}

impl ImageBackground {
    /// Unadjusted, fully opaque image fill.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            content_mode: ContentMode::Fill,
            blur: 0.0,
            overlay: Color::clear(),
            brightness: 0.0,
            saturation: 1.0,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlassBackground {
    #[serde(default = "default_glass_blur")]
    pub blur_radius: f64,
    #[serde(default = "Color::white")]
    pub tint_color: Color,
    #[serde(default = "default_tint_opacity")]
    pub tint_opacity: f64,
    #[serde(default = "default_noise_opacity")]
    pub noise_opacity: f64,
    #[serde(default = "one")]
    pub border_width: f64,
    #[serde(default = "default_border_opacity")]
    pub border_opacity: f64,
}

fn default_glass_blur() -> f64 {
    20.0
}

fn default_tint_opacity() -> f64 {
    0.2
}

fn default_noise_opacity() -> f64 {
    0.03
}

fn default_border_opacity() -> f64 {
    0.3
}

impl Default for GlassBackground {
    fn default() -> Self {
        Self {
            blur_radius: default_glass_blur(),
            tint_color: Color::white(),
            tint_opacity: default_tint_opacity(),
            noise_opacity: default_noise_opacity(),
            border_width: 1.0,
            border_opacity: default_border_opacity(),
        }
    }
}

/// Opacity is clamped to `[0, 1]` and scale to a positive finite factor when deserialized.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", from = "PatternFields")]
pub struct PatternBackground {
    pub pattern_kind: PatternKind,
    pub base_color: Color,
    pub pattern_color: Color,
    pub pattern_opacity: f64,
    pub pattern_scale: f64,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatternFields {
    pattern_kind: PatternKind,
    base_color: Color,
    pattern_color: Color,
    #[serde(default = "default_pattern_opacity")]
    pattern_opacity: f64,
    #[serde(default = "one")]
    pattern_scale: f64,
}

impl From<PatternFields> for PatternBackground {
    fn from(f: PatternFields) -> Self {
        Self::new(f.pattern_kind, f.base_color, f.pattern_color)
            .with_opacity(f.pattern_opacity)
            .with_scale(f.pattern_scale)
    }
}

impl PatternBackground {
    /// Pattern at the default opacity and scale 1.
    pub fn new(pattern_kind: PatternKind, base_color: Color, pattern_color: Color) -> Self {
        Self {
            pattern_kind,
            base_color,
            pattern_color,
            pattern_opacity: default_pattern_opacity(),
            pattern_scale: 1.0,
        }
    }

    /// Non-finite counts as transparent.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.pattern_opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.pattern_scale = sanitize_scale(scale);
        self
    }
}

fn default_pattern_opacity() -> f64 {
    0.3
}
