use crate::{
    binding::provider::BindingKey,
    paint::{color::Color, gradient::Gradient},
};

/// The content a layer renders. Exactly one variant is active.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    /// Literal text.
    Text(TextElement),
    /// Text resolved at render time from the content provider.
    DataBinding(DataBindingElement),
    /// A symbol glyph.
    Icon(IconElement),
    /// Vector geometry.
    Shape(ShapeElement),
}

impl Element {
    /// Short variant tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::DataBinding(_) => "dataBinding",
            Self::Icon(_) => "icon",
            Self::Shape(_) => "shape",
        }
    }

    /// Literal text element with the given style.
    pub fn text(content: impl Into<String>, style: TextStyle) -> Self {
        Self::Text(TextElement {
            content: content.into(),
            style,
        })
    }

    /// Data-bound text element with the given style.
    pub fn binding(key: BindingKey, style: TextStyle) -> Self {
        Self::DataBinding(DataBindingElement { key, style })
    }

    /// Icon element.
    pub fn icon(symbol: impl Into<String>, color: Color, size: f64) -> Self {
        Self::Icon(IconElement {
            symbol: symbol.into(),
            color,
            size,
        })
    }

    /// Shape element with a solid fill.
    pub fn shape(kind: ShapeKind, fill: ShapeFill, corner_radius: f64) -> Self {
        Self::Shape(ShapeElement {
            kind,
            fill,
            corner_radius,
            stroke_width: default_stroke_width(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBindingElement {
    /// Binding key; the value is never stored on the element.
    pub key: BindingKey,
    #[serde(default)]
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconElement {
    /// Symbol identifier, e.g. `"heart.fill"`.
    pub symbol: String,
    #[serde(default = "Color::white")]
    pub color: Color,
    /// Glyph size in canvas points.
    #[serde(default = "default_icon_size")]
    pub size: f64,
}

fn default_icon_size() -> f64 {
    24.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub kind: ShapeKind,
    pub fill: ShapeFill,
    /// Only used by `roundedRectangle`; in canvas points.
    #[serde(default)]
    pub corner_radius: f64,
    /// Only used by `line`; in canvas points.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

fn default_stroke_width() -> f64 {
    2.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    /// Circle inscribed in the frame, centered.
    Circle,
    /// Horizontal line through the middle of the frame.
    Line,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShapeFill {
    Solid { color: Color },
    Gradient { gradient: Gradient },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlignment {
    Leading,
    #[default]
    Center,
    Trailing,
}

/// Shared styling for literal and data-bound text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default)]
    pub font: FontDescriptor,
    #[serde(default = "Color::white")]
    pub color: Color,
    #[serde(default)]
    pub alignment: TextAlignment,
    /// Extra spacing between characters, in canvas points.
    #[serde(default)]
    pub letter_spacing: f64,
    /// Extra spacing between lines, in canvas points.
    #[serde(default)]
    pub line_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            color: Color::white(),
            alignment: TextAlignment::Center,
            letter_spacing: 0.0,
            line_spacing: 0.0,
        }
    }
}

impl TextStyle {
    pub fn new(font: FontDescriptor, color: Color) -> Self {
        Self {
            font,
            color,
            ..Self::default()
        }
    }

    pub fn aligned(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    /// Named family; `None` selects the system face for `design`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Size in canvas points.
    #[serde(default = "default_font_size")]
    pub size: f64,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub design: FontDesign,
    #[serde(default)]
    pub italic: bool,
}

fn default_font_size() -> f64 {
    17.0
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::system(default_font_size(), FontWeight::Regular)
    }
}

impl FontDescriptor {
    /// System face at `size` / `weight`.
    pub fn system(size: f64, weight: FontWeight) -> Self {
        Self {
            family: None,
            size,
            weight,
            design: FontDesign::Default,
            italic: false,
        }
    }

    pub fn with_design(mut self, design: FontDesign) -> Self {
        self.design = design;
        self
    }

    /// CSS-style family list: the named family first, then the generic for `design`.
    pub fn family_list(&self) -> String {
        let generic = self.design.generic_family();
        match &self.family {
            Some(name) if !name.trim().is_empty() => format!("'{}', {generic}", name.trim()),
            _ => generic.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    UltraLight,
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

impl FontWeight {
    /// Numeric OpenType weight.
    pub fn numeric(self) -> u16 {
        match self {
            Self::UltraLight => 100,
            Self::Thin => 200,
            Self::Light => 300,
            Self::Regular => 400,
            Self::Medium => 500,
            Self::Semibold => 600,
            Self::Bold => 700,
            Self::Heavy => 800,
            Self::Black => 900,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontDesign {
    #[default]
    Default,
    Serif,
    Rounded,
    Monospaced,
}

impl FontDesign {
    pub fn generic_family(self) -> &'static str {
        match self {
            Self::Default | Self::Rounded => "sans-serif",
            Self::Serif => "serif",
            Self::Monospaced => "monospace",
        }
    }
}
