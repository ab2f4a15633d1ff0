//! Session storage implementations.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use super::SessionStorage;

/// In-memory storage, scoped to the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Storage persisted as a JSON object in a file.
///
/// Lets a headless session survive process restarts, e.g. between CLI runs.
/// A missing or unreadable file reads as empty storage; write failures are
/// logged and otherwise ignored, like a browser refusing a storage write.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: RwLock<()>,
}

impl FileSessionStorage {
    /// Storage backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let Ok(raw) = std::fs::read(&self.path) else {
            return BTreeMap::new();
        };

        serde_json::from_slice(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Ignoring corrupt session storage file"
            );
            BTreeMap::new()
        })
    }

    fn save(&self, items: &BTreeMap<String, String>) {
        let result = serde_json::to_vec_pretty(items)
            .map_err(std::io::Error::other)
            .and_then(|bytes| std::fs::write(&self.path, bytes));

        if let Err(e) = result {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to write session storage file"
            );
        }
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        self.load().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load();
        items.insert(key.to_string(), value.to_string());
        self.save(&items);
    }

    fn remove_item(&self, key: &str) {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.load();
        if items.remove(key).is_some() {
            self.save(&items);
        }
    }
}
