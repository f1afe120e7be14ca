// ABOUTME: Key-value preference storage for persisted UI state.
// ABOUTME: Provides the store trait, an in-memory store, and a file-per-key disk store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Durable key-value store holding opaque byte payloads.
///
/// A write under a key atomically replaces the previous value, and a read
/// returns the most recent write.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Typed helpers layered over the raw byte interface
pub trait PreferenceStoreExt: PreferenceStore {
    /// Read and decode a JSON value. `Ok(None)` means nothing is stored.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.set(key, &bytes)
    }

    /// Read a boolean flag, treating missing or unreadable values as unset
    fn get_flag(&self, key: &str) -> bool {
        match self.get_json::<bool>(key) {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                tracing::warn!("Unreadable flag {}: {}", key, e);
                false
            }
        }
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.set_json(key, &value)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStoreExt for S {}

/// In-process store. Records how many times each key was written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, Vec<u8>>,
    writes: HashMap<String, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // A panic while holding the lock cannot leave the maps half-updated
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of `set` calls seen for `key`
    pub fn write_count(&self, key: &str) -> usize {
        self.lock().writes.get(key).copied().unwrap_or(0)
    }

    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().values.contains_key(key)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock().values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.values.insert(key.to_string(), value.to_vec());
        *inner.writes.entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

/// Disk store keeping one file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    const EXTENSION: &'static str = "pref";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the store at the configured (or default) preference directory
    pub fn open(settings: &crate::config::StorageSettings) -> Result<Self, StoreError> {
        let root = settings.resolve_directory().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.{}", key, Self::EXTENSION)))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)?;

        // Write beside the target then rename so readers never see a partial file
        let tmp = path.with_extension(format!("{}.tmp", Self::EXTENSION));
        std::fs::write(&tmp, value)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                tracing::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }
        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid preference key: {0:?}")]
    InvalidKey(String),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Wrap a store so both state managers can hold the same instance
pub fn shared<S: PreferenceStore>(store: S) -> Arc<S> {
    Arc::new(store)
}
