use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{LayerkitError, LayerkitResult};

/// Source of raw asset bytes, addressed by the reference strings stored in projects.
///
/// Implementations must be safe to call from worker threads; the image cache prefetches
/// off the caller's thread.
pub trait AssetStore: Send + Sync {
    /// Read the bytes behind `reference`.
    fn load_bytes(&self, reference: &str) -> LayerkitResult<Vec<u8>>;
}

/// Assets stored as files below a root directory.
#[derive(Clone, Debug)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving relative references.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for DirAssetStore {
    fn load_bytes(&self, reference: &str) -> LayerkitResult<Vec<u8>> {
        let norm = normalize_rel_path(reference)?;
        let path = self.root.join(Path::new(&norm));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(LayerkitError::from)
    }
}

/// In-memory assets, mostly for hosts that ship bundled images and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetStore {
    entries: HashMap<String, Arc<Vec<u8>>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under the normalized form of `reference`.
    pub fn insert(&mut self, reference: &str, bytes: Vec<u8>) -> LayerkitResult<()> {
        let norm = normalize_rel_path(reference)?;
        self.entries.insert(norm, Arc::new(bytes));
        Ok(())
    }

    pub fn with(mut self, reference: &str, bytes: Vec<u8>) -> LayerkitResult<Self> {
        self.insert(reference, bytes)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetStore for MemoryAssetStore {
    fn load_bytes(&self, reference: &str) -> LayerkitResult<Vec<u8>> {
        let norm = normalize_rel_path(reference)?;
        self.entries
            .get(&norm)
            .map(|b| b.as_ref().clone())
            .ok_or_else(|| LayerkitError::asset(format!("unknown asset reference '{reference}'")))
    }
}

/// Normalize and validate store-relative asset references.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(reference: &str) -> LayerkitResult<String> {
    let s = reference.trim().replace('\\', "/");
    if s.starts_with('/') {
        return Err(LayerkitError::validation("asset references must be relative"));
    }
    if s.is_empty() {
        return Err(LayerkitError::validation("asset reference must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(LayerkitError::validation(
                "asset references must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(LayerkitError::validation(
            "asset reference must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
