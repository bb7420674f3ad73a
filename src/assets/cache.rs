//! Shared decoded-image cache with background prefetch.
//!
//! The compositor never blocks on IO: it asks an [`ImageSource`] for an already decoded
//! image and falls back to a placeholder when none is available. Hosts warm the cache with
//! [`ImageCache::load_now`] or [`ImageCache::prefetch`] and re-render when a prefetch
//! completes.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    assets::{
        decode::{PreparedImage, decode_image},
        store::{AssetStore, normalize_rel_path},
    },
    foundation::error::{LayerkitError, LayerkitResult},
};

/// Synchronous lookup of decoded images by reference.
pub trait ImageSource: Sync {
    /// Decoded image for `reference`, or `None` when it is not (yet) available.
    fn image(&self, reference: &str) -> Option<Arc<PreparedImage>>;
}

/// Source that never has any image.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn image(&self, _reference: &str) -> Option<Arc<PreparedImage>> {
        None
    }
}

impl ImageSource for HashMap<String, Arc<PreparedImage>> {
    fn image(&self, reference: &str) -> Option<Arc<PreparedImage>> {
        self.get(reference).cloned()
    }
}

/// Notification delivered when a prefetch settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetEvent {
    Ready { reference: String },
    Failed { reference: String, message: String },
}

/// Cache state of one reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug)]
enum Entry {
    Pending,
    Ready(Arc<PreparedImage>),
    Failed(String),
}

/// Thread-safe decoded image cache over an [`AssetStore`].
///
/// Clones share the same entries.
#[derive(Clone)]
pub struct ImageCache {
    store: Arc<dyn AssetStore>,
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

impl ImageCache {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self {
            store,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load and decode `reference` on the calling thread, reusing a cached result.
    ///
    /// Failed loads are retried on every call.
    pub fn load_now(&self, reference: &str) -> LayerkitResult<Arc<PreparedImage>> {
        let key = normalize_rel_path(reference)?;
        if let Some(Entry::Ready(img)) = self.entry(&key) {
            return Ok(img);
        }
        let result = load_and_decode(self.store.as_ref(), &key);
        self.settle(&key, &result);
        result
    }

    /// Load `reference` on the rayon pool and call `on_ready` once it settles.
    ///
    /// References that are already cached or in flight are not fetched again; `on_ready` is
    /// invoked immediately for cached ones and never for in-flight ones.
    pub fn prefetch(&self, reference: &str, on_ready: impl FnOnce(AssetEvent) + Send + 'static) {
        let key = match normalize_rel_path(reference) {
            Ok(key) => key,
            Err(err) => {
                on_ready(AssetEvent::Failed {
                    reference: reference.to_string(),
                    message: err.to_string(),
                });
                return;
            }
        };

        let cached = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            match entries.get(&key) {
                Some(Entry::Ready(_)) => true,
                Some(Entry::Pending) => return,
                Some(Entry::Failed(_)) | None => {
                    entries.insert(key.clone(), Entry::Pending);
                    false
                }
            }
        };
        if cached {
            on_ready(AssetEvent::Ready { reference: key });
            return;
        }

        let this = self.clone();
        rayon::spawn(move || {
            let result = load_and_decode(this.store.as_ref(), &key);
            this.settle(&key, &result);
            let event = match result {
                Ok(_) => AssetEvent::Ready { reference: key },
                Err(err) => AssetEvent::Failed {
                    reference: key,
                    message: err.to_string(),
                },
            };
            on_ready(event);
        });
    }

    /// Prefetch every reference, ignoring completion events.
    pub fn prefetch_all<'a>(&self, references: impl IntoIterator<Item = &'a str>) {
        for r in references {
            self.prefetch(r, |_| {});
        }
    }

    pub fn status(&self, reference: &str) -> Option<AssetStatus> {
        let key = normalize_rel_path(reference).ok()?;
        self.entry(&key).map(|e| match e {
            Entry::Pending => AssetStatus::Pending,
            Entry::Ready(_) => AssetStatus::Ready,
            Entry::Failed(msg) => AssetStatus::Failed(msg),
        })
    }

    /// Insert an already decoded image.
    pub fn insert(&self, reference: &str, image: PreparedImage) -> LayerkitResult<()> {
        let key = normalize_rel_path(reference)?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Entry::Ready(Arc::new(image)));
        Ok(())
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, key: &str) -> Option<Entry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn settle(&self, key: &str, result: &LayerkitResult<Arc<PreparedImage>>) {
        let entry = match result {
            Ok(img) => Entry::Ready(img.clone()),
            Err(err) => {
                tracing::warn!(reference = key, %err, "image load failed");
                Entry::Failed(err.to_string())
            }
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }
}

impl ImageSource for ImageCache {
    fn image(&self, reference: &str) -> Option<Arc<PreparedImage>> {
        let key = normalize_rel_path(reference).ok()?;
        match self.entry(&key)? {
            Entry::Ready(img) => Some(img),
            Entry::Pending | Entry::Failed(_) => None,
        }
    }
}

fn load_and_decode(store: &dyn AssetStore, key: &str) -> LayerkitResult<Arc<PreparedImage>> {
    let bytes = store.load_bytes(key)?;
    let img = decode_image(&bytes)?;
    if img.is_empty() {
        return Err(LayerkitError::asset(format!("image '{key}' has no pixels")));
    }
    tracing::debug!(reference = key, width = img.width, height = img.height, "image decoded");
    Ok(Arc::new(img))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
