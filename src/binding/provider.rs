use std::collections::HashMap;

/// Identifier of a live value supplied by the host's content layer.
///
/// Known keys are exposed as constants; any other string round-trips unchanged so
/// documents written by newer hosts still load.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct BindingKey(String);

impl BindingKey {
    pub const VERSE_REFERENCE: &'static str = "verseReference";
    pub const VERSE_TEXT: &'static str = "verseText";
    pub const DATE: &'static str = "date";
    pub const DAY_OF_WEEK: &'static str = "dayOfWeek";
    pub const COUNTDOWN_TITLE: &'static str = "countdownTitle";
    pub const COUNTDOWN_DAYS: &'static str = "countdownDays";
    pub const PRAYER_COUNT: &'static str = "prayerCount";
    pub const STREAK_DAYS: &'static str = "streakDays";
    pub const READING_PLAN_TITLE: &'static str = "readingPlanTitle";
    pub const READING_PROGRESS: &'static str = "readingProgress";

    /// Every key the engine knows a sample value for.
    pub const KNOWN: [&'static str; 10] = [
        Self::VERSE_REFERENCE,
        Self::VERSE_TEXT,
        Self::DATE,
        Self::DAY_OF_WEEK,
        Self::COUNTDOWN_TITLE,
        Self::COUNTDOWN_DAYS,
        Self::PRAYER_COUNT,
        Self::STREAK_DAYS,
        Self::READING_PLAN_TITLE,
        Self::READING_PROGRESS,
    ];

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn verse_reference() -> Self {
        Self::new(Self::VERSE_REFERENCE)
    }

    pub fn verse_text() -> Self {
        Self::new(Self::VERSE_TEXT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }

    /// Representative value for previews and catalog thumbnails.
    pub fn sample_value(&self) -> Option<&'static str> {
        let v = match self.0.as_str() {
            Self::VERSE_REFERENCE => "John 3:16",
            Self::VERSE_TEXT => {
                "For God so loved the world, that he gave his only begotten Son"
            }
            Self::DATE => "March 14",
            Self::DAY_OF_WEEK => "Sunday",
            Self::COUNTDOWN_TITLE => "Easter",
            Self::COUNTDOWN_DAYS => "12",
            Self::PRAYER_COUNT => "128",
            Self::STREAK_DAYS => "7",
            Self::READING_PLAN_TITLE => "Psalms in 30 Days",
            Self::READING_PROGRESS => "40%",
            _ => return None,
        };
        Some(v)
    }
}

impl std::fmt::Display for BindingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BindingKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Synchronous source of current binding values.
///
/// Queried on every render pass. Providers backed by slow storage are expected to cache
/// internally and return their best-known value without blocking.
pub trait ContentProvider {
    fn value(&self, key: &BindingKey) -> Option<String>;
}

impl<F> ContentProvider for F
where
    F: Fn(&BindingKey) -> Option<String>,
{
    fn value(&self, key: &BindingKey) -> Option<String> {
        self(key)
    }
}

/// Map-backed provider.
#[derive(Clone, Debug, Default)]
pub struct StaticContentProvider {
    values: HashMap<BindingKey, String>,
}

impl StaticContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<BindingKey>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<BindingKey>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &BindingKey) -> Option<String> {
        self.values.remove(key)
    }
}

impl ContentProvider for StaticContentProvider {
    fn value(&self, key: &BindingKey) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Provider answering every known key with its sample value.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreviewContentProvider;

impl ContentProvider for PreviewContentProvider {
    fn value(&self, key: &BindingKey) -> Option<String> {
        key.sample_value().map(str::to_string)
    }
}

/// Provider with no values at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyContentProvider;

impl ContentProvider for EmptyContentProvider {
    fn value(&self, _key: &BindingKey) -> Option<String> {
        None
    }
}

/// Resolve `key` against `provider`; a miss yields the empty string.
pub fn resolve_binding(key: &BindingKey, provider: &dyn ContentProvider) -> String {
    match provider.value(key) {
        Some(v) => v,
        None => {
            tracing::debug!(key = key.as_str(), "binding has no current value");
            String::new()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/provider.rs"]
mod tests;
