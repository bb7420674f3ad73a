use uuid::Uuid;

use crate::model::{element::Element, layout::LayoutFrame};

/// One positioned, styled piece of content; the atomic composable unit.
///
/// Layers draw in ascending `z_index`; equal indices keep declaration order. Opacity is
/// clamped to `[0, 1]` on construction and deserialization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", from = "LayerFields")]
pub struct Layer {
    pub id: Uuid,
    pub name: String,
    pub element: Element,
    #[serde(default)]
    pub frame: LayoutFrame,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default = "yes")]
    pub is_visible: bool,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayerFields {
    id: Uuid,
    name: String,
    element: Element,
    #[serde(default)]
    frame: LayoutFrame,
    #[serde(default)]
    z_index: i32,
    #[serde(default = "one")]
    opacity: f64,
    #[serde(default = "yes")]
    is_visible: bool,
}

impl From<LayerFields> for Layer {
    fn from(f: LayerFields) -> Self {
        Self {
            id: f.id,
            name: f.name,
            element: f.element,
            frame: f.frame,
            z_index: f.z_index,
            opacity: clamp_opacity(f.opacity),
            is_visible: f.is_visible,
        }
    }
}

/// Non-finite counts as opaque.
fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

impl Layer {
    /// New visible, opaque layer at z-index 0 with a fresh id.
    pub fn new(name: impl Into<String>, element: Element, frame: LayoutFrame) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            element,
            frame,
            z_index: 0,
            opacity: 1.0,
            is_visible: true,
        }
    }

    pub fn with_z(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = clamp_opacity(opacity);
        self
    }

    /// Opacity clamped to `[0, 1]`, also for layers whose public field was set directly.
    pub fn effective_opacity(&self) -> f64 {
        clamp_opacity(self.opacity)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/layer.rs"]
mod tests;
