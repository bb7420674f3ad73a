use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::project::{Project, WidgetSize, WidgetType},
    paint::color::Color,
};

/// Catalog grouping of templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateCategory {
    Scripture,
    Prayer,
    Minimal,
    Nature,
    Bold,
    Seasonal,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 6] = [
        Self::Scripture,
        Self::Prayer,
        Self::Minimal,
        Self::Nature,
        Self::Bold,
        Self::Seasonal,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Scripture => "Scripture",
            Self::Prayer => "Prayer",
            Self::Minimal => "Minimal",
            Self::Nature => "Nature",
            Self::Bold => "Bold",
            Self::Seasonal => "Seasonal",
        }
    }

    /// Case-insensitive lookup by serialized or display name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(name))
    }
}

/// An immutable, catalog-provided design used as a starting point.
///
/// Usage and favorites are tracked by the library, never on the template itself.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    pub widget_types: Vec<WidgetType>,
    pub widget_sizes: Vec<WidgetSize>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Swatch shown while the preview renders.
    #[serde(default)]
    pub preview_color: Color,
    pub project: Project,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_featured: bool,
    /// Seasonal templates stop being listed after this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Template {
    pub fn is_seasonal(&self) -> bool {
        self.expires_at.is_some()
    }

    /// `true` once `now` is at or past the expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    pub fn supports(&self, widget_type: WidgetType, size: WidgetSize) -> bool {
        self.widget_types.contains(&widget_type) && self.widget_sizes.contains(&size)
    }

    /// Case-insensitive substring match over name, description and tags.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Deep copy of the embedded project as a new, user-owned project.
    ///
    /// The copy gets fresh project and layer ids, points back at this template, is not a
    /// favorite and is named `"{template} - {widget type}"`. Compatibility is not checked.
    pub fn instantiate(&self, widget_type: WidgetType, size: WidgetSize) -> Project {
        let now = Utc::now();
        let mut project = self.project.clone();
        project.id = Uuid::new_v4();
        project.name = format!("{} - {}", self.name, widget_type.display_name());
        project.widget_type = widget_type;
        project.widget_size = size;
        project.is_favorite = false;
        project.template_id = Some(self.id.clone());
        project.created_at = now;
        project.modified_at = now;
        for layer in &mut project.layers {
            layer.id = Uuid::new_v4();
        }
        project
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/template.rs"]
mod tests;
