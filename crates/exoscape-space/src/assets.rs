//! Path-keyed cache of loaded assets (textures, sprites).
//!
//! Each path is loaded at most once per cache; every later request gets a
//! clone of the same [`Arc`]. The cache is an ordinary value owned by the
//! caller, so separate scenes can hold separate caches.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Loaded assets of type `T`, keyed by source path.
#[derive(Debug)]
pub struct AssetCache<T> {
    entries: FxHashMap<PathBuf, Arc<T>>,
}

impl<T> Default for AssetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AssetCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Return the cached asset for `path`, calling `loader` only when the path
    /// has not been loaded yet. A failed load is not cached.
    pub fn get_or_load<E, F>(&mut self, path: &Path, loader: F) -> Result<Arc<T>, E>
    where
        F: FnOnce(&Path) -> Result<T, E>,
    {
        if let Some(existing) = self.entries.get(path) {
            return Ok(Arc::clone(existing));
        }

        let asset = Arc::new(loader(path)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&asset));
        log::debug!("Loaded asset {}", path.display());
        Ok(asset)
    }

    /// Cached asset for `path`, without loading.
    pub fn get(&self, path: &Path) -> Option<Arc<T>> {
        self.entries.get(path).map(Arc::clone)
    }

    /// Drop `path` from the cache. Returns whether it was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Number of cached assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
