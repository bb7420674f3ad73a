use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Utc};

use crate::{
    catalog::template::{Template, TemplateCategory},
    foundation::error::{LayerkitError, LayerkitResult},
    model::project::{Project, WidgetSize, WidgetType},
};

/// Maximum length of the recently-used list.
pub const RECENTS_CAPACITY: usize = 10;

/// Per-user catalog state: most-recently-used ids (most recent first) and favorites.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryState {
    #[serde(default)]
    pub recents: VecDeque<String>,
    #[serde(default)]
    pub favorites: BTreeSet<String>,
}

impl LibraryState {
    fn mark_used(&mut self, id: &str) {
        if let Some(pos) = self.recents.iter().position(|r| r == id) {
            self.recents.remove(pos);
        }
        self.recents.push_front(id.to_string());
        self.recents.truncate(RECENTS_CAPACITY);
    }
}

/// A fixed set of templates plus usage state.
///
/// Constructed explicitly and passed around by the host; there is no global instance.
#[derive(Clone, Debug, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
    state: LibraryState,
}

impl TemplateLibrary {
    /// Library over `templates` in the given order. Later duplicates of an id are dropped.
    pub fn new(templates: impl IntoIterator<Item = Template>) -> Self {
        let mut out: Vec<Template> = Vec::new();
        for t in templates {
            if out.iter().any(|o| o.id == t.id) {
                tracing::warn!(id = %t.id, "duplicate template id ignored");
                continue;
            }
            out.push(t);
        }
        Self {
            templates: out,
            state: LibraryState::default(),
        }
    }

    /// The curated built-in catalog.
    pub fn builtin() -> Self {
        Self::new(crate::catalog::builtin::builtin_templates())
    }

    /// Restore persisted state. Ids no longer in the catalog are kept so they survive
    /// catalog updates, but are never returned from queries.
    /// Repeated recents keep their first (most recent) position.
    pub fn with_state(mut self, mut state: LibraryState) -> Self {
        let mut seen = BTreeSet::new();
        state.recents.retain(|id| seen.insert(id.clone()));
        state.recents.truncate(RECENTS_CAPACITY);
        self.state = state;
        self
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Every template, expired or not.
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    /// Direct lookup; seasonal expiry does not hide a template here.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn list_by_category(&self, category: TemplateCategory) -> Vec<&Template> {
        self.list_by_category_at(category, Utc::now())
    }

    /// Templates in `category` that have not expired at `now`.
    pub fn list_by_category_at(
        &self,
        category: TemplateCategory,
        now: DateTime<Utc>,
    ) -> Vec<&Template> {
        self.listed_at(now)
            .filter(|t| t.category == category)
            .collect()
    }

    /// Templates usable for `widget_type` at `size`.
    pub fn compatible(&self, widget_type: WidgetType, size: WidgetSize) -> Vec<&Template> {
        self.listed_at(Utc::now())
            .filter(|t| t.supports(widget_type, size))
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<&Template> {
        self.search_at(query, Utc::now())
    }

    /// Case-insensitive substring search over name, description and tags.
    pub fn search_at(&self, query: &str, now: DateTime<Utc>) -> Vec<&Template> {
        let needle = query.trim().to_lowercase();
        self.listed_at(now).filter(|t| t.matches(&needle)).collect()
    }

    pub fn featured(&self) -> Vec<&Template> {
        self.featured_at(Utc::now())
    }

    pub fn featured_at(&self, now: DateTime<Utc>) -> Vec<&Template> {
        self.listed_at(now).filter(|t| t.is_featured).collect()
    }

    /// Recently used templates, most recent first.
    pub fn recents(&self) -> Vec<&Template> {
        self.state.recents.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Favorite templates in catalog order.
    pub fn favorites(&self) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| self.state.favorites.contains(&t.id))
            .collect()
    }

    /// Move `id` to the front of the recents list, evicting the oldest past capacity.
    pub fn mark_used(&mut self, id: &str) {
        self.state.mark_used(id);
    }

    /// Flip the favorite flag and return the new state.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        if self.state.favorites.remove(id) {
            false
        } else {
            self.state.favorites.insert(id.to_string());
            true
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.favorites.contains(id)
    }

    /// Clone template `id` into a new project and record the use.
    pub fn instantiate(
        &mut self,
        id: &str,
        widget_type: WidgetType,
        size: WidgetSize,
    ) -> LayerkitResult<Project> {
        let template = self
            .get(id)
            .ok_or_else(|| LayerkitError::validation(format!("unknown template '{id}'")))?;
        if !template.supports(widget_type, size) {
            tracing::debug!(
                id,
                ?widget_type,
                ?size,
                "instantiating template outside its compatibility lists"
            );
        }
        let project = template.instantiate(widget_type, size);
        self.state.mark_used(id);
        Ok(project)
    }

    fn listed_at(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(move |t| !t.is_expired(now))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/library.rs"]
mod tests;
