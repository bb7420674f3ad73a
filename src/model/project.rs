use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    foundation::{
        core::PixelSize,
        error::{LayerkitError, LayerkitResult},
    },
    model::{
        element::{Element, ShapeFill},
        layer::Layer,
    },
    paint::background::Background,
};

/// Schema version written on every serialized project.
pub const PROJECT_SCHEMA_VERSION: u32 = 1;

/// What a widget shows; used for naming and catalog compatibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetType {
    VerseOfDay,
    PrayerReminder,
    ReadingProgress,
    Countdown,
    Quote,
    CommunityPrayer,
    Custom,
}

impl WidgetType {
    pub const ALL: [WidgetType; 7] = [
        Self::VerseOfDay,
        Self::PrayerReminder,
        Self::ReadingProgress,
        Self::Countdown,
        Self::Quote,
        Self::CommunityPrayer,
        Self::Custom,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::VerseOfDay => "Verse of the Day",
            Self::PrayerReminder => "Prayer Reminder",
            Self::ReadingProgress => "Reading Progress",
            Self::Countdown => "Countdown",
            Self::Quote => "Quote",
            Self::CommunityPrayer => "Community Prayer",
            Self::Custom => "Custom",
        }
    }
}

/// Size class of a widget; selects the canvas aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl WidgetSize {
    pub const ALL: [WidgetSize; 4] = [Self::Small, Self::Medium, Self::Large, Self::ExtraLarge];

    /// Canonical canvas size in points. Point-based element sizes (fonts, icons, radii)
    /// are relative to this size.
    pub fn canvas_size(self) -> (f64, f64) {
        match self {
            Self::Small => (170.0, 170.0),
            Self::Medium => (364.0, 170.0),
            Self::Large => (364.0, 382.0),
            Self::ExtraLarge => (768.0, 382.0),
        }
    }

    pub fn aspect_ratio(self) -> f64 {
        let (w, h) = self.canvas_size();
        w / h
    }

    /// Pixel size at a display scale factor (e.g. `2.0` or `3.0`).
    pub fn pixel_size(self, scale: f64) -> PixelSize {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let (w, h) = self.canvas_size();
        PixelSize::new((w * scale).round() as u32, (h * scale).round() as u32)
    }
}

/// A complete widget design: ordered layers over one background.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub id: Uuid,
    pub name: String,
    pub widget_type: WidgetType,
    pub widget_size: WidgetSize,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub background: Background,
    #[serde(default)]
    pub is_favorite: bool,
    /// Id of the template this project was cloned from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub modified_at: DateTime<Utc>,
}

fn default_schema_version() -> u32 {
    PROJECT_SCHEMA_VERSION
}

impl Project {
    /// Empty, user-authored project with a fresh identity.
    pub fn new(name: impl Into<String>, widget_type: WidgetType, widget_size: WidgetSize) -> Self {
        let now = Utc::now();
        Self {
            schema_version: PROJECT_SCHEMA_VERSION,
            id: Uuid::new_v4(),
            name: name.into(),
            widget_type,
            widget_size,
            layers: Vec::new(),
            background: Background::default(),
            is_favorite: false,
            template_id: None,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Append layers keeping their own z-indices.
    pub fn with_layers(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Layers sorted by ascending z-index; ties keep declaration order.
    pub fn layers_in_render_order(&self) -> Vec<&Layer> {
        let mut ordered: Vec<&Layer> = self.layers.iter().collect();
        ordered.sort_by_key(|l| l.z_index);
        ordered
    }

    /// Append `layer` on top of every existing layer and return its id.
    pub fn add_layer(&mut self, mut layer: Layer) -> Uuid {
        layer.z_index = self
            .layers
            .iter()
            .map(|l| l.z_index)
            .max()
            .map_or(0, |z| z.saturating_add(1));
        let id = layer.id;
        self.layers.push(layer);
        self.touch();
        id
    }

    pub fn remove_layer(&mut self, id: Uuid) -> Option<Layer> {
        let idx = self.layers.iter().position(|l| l.id == id)?;
        self.touch();
        Some(self.layers.remove(idx))
    }

    pub fn layer(&self, id: Uuid) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: Uuid) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Bump `modified_at`.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Canvas aspect ratio derived from the size class.
    pub fn aspect_ratio(&self) -> f64 {
        self.widget_size.aspect_ratio()
    }

    /// Report structural issues for hosts. Rendering never requires this to pass.
    pub fn validate(&self) -> LayerkitResult<()> {
        if self.schema_version > PROJECT_SCHEMA_VERSION {
            return Err(LayerkitError::validation(format!(
                "project schema version {} is newer than supported {}",
                self.schema_version, PROJECT_SCHEMA_VERSION
            )));
        }

        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id) {
                return Err(LayerkitError::validation(format!(
                    "duplicate layer id {}",
                    layer.id
                )));
            }
            if !layer.frame.is_finite() {
                return Err(LayerkitError::validation(format!(
                    "layer '{}' has a non-finite frame",
                    layer.name
                )));
            }
            if let Element::Shape(shape) = &layer.element
                && let ShapeFill::Gradient { gradient } = &shape.fill
                && gradient.stops.is_empty()
            {
                return Err(LayerkitError::validation(format!(
                    "layer '{}' has a gradient without stops",
                    layer.name
                )));
            }
        }

        if let Background::Gradient { gradient } = &self.background
            && gradient.stops.is_empty()
        {
            return Err(LayerkitError::validation(
                "background gradient must have at least one stop",
            ));
        }
        if let Background::Image(image) = &self.background
            && image.reference.trim().is_empty()
        {
            return Err(LayerkitError::validation(
                "image background reference must be non-empty",
            ));
        }
        Ok(())
    }

    /// Decode a project document; missing optional fields take their defaults.
    pub fn from_json_str(json: &str) -> LayerkitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string_pretty(&self) -> LayerkitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/project.rs"]
mod tests;
