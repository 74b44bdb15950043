//! Durable key-value storage behind a small interface.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session token, search history and theme preference all live in
//! client-side string storage. `LocalStorage` is the browser backend,
//! `FileStorage` backs the CLI, and `MemoryStorage` stands in for tests.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail: missing or unreadable data is reported as absent. Writes
//! return `StorageError` so callers can log it; no caller surfaces it further.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Errors produced by storage writes.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored map could not be serialized.
    #[error("storage encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// No storage is reachable (e.g. `localStorage` disabled).
    #[error("storage unavailable")]
    Unavailable,
}

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage handle shared by the session, history and theme stores.
pub type SharedStore = Rc<dyn KeyValueStore>;

// =============================================================================
// MEMORY
// =============================================================================

/// In-process storage. Contents die with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> SharedStore {
        Rc::new(Self::new())
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// A single JSON object file holding every key.
///
/// The file is re-read on every access so separate processes see each other's
/// writes. Read-modify-write is not atomic across processes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "state file unreadable");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "state file corrupt; treating as empty");
            BTreeMap::new()
        })
    }

    fn store(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.load();
        items.insert(key.to_owned(), value.to_owned());
        self.store(&items)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.load();
        if items.remove(key).is_some() {
            self.store(&items)?;
        }
        Ok(())
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage`. Every operation is a no-op outside a browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage.set_item(key, value).map_err(|_| StorageError::Unavailable)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage.remove_item(key).map_err(|_| StorageError::Unavailable)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}

// =============================================================================
// JSON HELPERS
// =============================================================================

/// Load and decode a JSON value. Absent or undecodable data yields `None`.
pub fn load_json<T: serde::de::DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value corrupt; ignoring");
            None
        }
    }
}

/// Encode and save a JSON value, logging instead of failing.
pub fn save_json<T: serde::Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "value not encodable; not saved");
            return;
        }
    };
    if let Err(e) = store.set(key, &raw) {
        tracing::warn!(key, error = %e, "storage write failed");
    }
}

/// Remove a key, logging instead of failing.
pub fn remove_logged(store: &dyn KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::warn!(key, error = %e, "storage remove failed");
    }
}
