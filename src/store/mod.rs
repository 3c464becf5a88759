//! Persisted key-value storage behind an injectable trait.
//!
//! The boot debounce forwarder owns exactly one integer key in here; the
//! trait exists so hosts can swap in their own preference storage and so
//! tests can use doubles without touching the filesystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::core::errors::{GlueError, Result};

/// Process-wide integer key-value storage.
///
/// Implementations must tolerate reads of keys that were never written
/// (return `None`, not an error).
pub trait KeyValueStore: Send + Sync {
    /// Read an integer value, `None` if the key was never written.
    fn get_i64(&self, key: &str) -> Result<Option<i64>>;

    /// Write an integer value, creating the key if needed.
    fn put_i64(&self, key: &str, value: i64) -> Result<()>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// Production store: a flat JSON object on disk with write-through caching.
///
/// The analog of the original app's named shared-preferences file. Reads are
/// served from the cache loaded at open; every `put` rewrites the file
/// before the cache is updated, so a value that was acknowledged is on disk.
#[derive(Debug)]
pub struct FilePrefsStore {
    path: PathBuf,
    cache: Mutex<BTreeMap<String, i64>>,
}

impl FilePrefsStore {
    /// Open a store at `path`, loading existing values.
    ///
    /// A missing file is an empty store; a file that exists but does not
    /// parse as a JSON object of integers is a hard error, not silently
    /// discarded state.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let cache = if path.exists() {
            let text =
                std::fs::read_to_string(&path).map_err(|e| GlueError::store_io(&path, e))?;
            serde_json::from_str::<BTreeMap<String, i64>>(&text).map_err(|e| {
                GlueError::StoreCorrupt {
                    path: path.clone(),
                    details: e.to_string(),
                }
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    /// Backing file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, i64>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| GlueError::store_io(parent, e))?;
        }
        let text = serde_json::to_string(entries)?;
        std::fs::write(&self.path, text).map_err(|e| GlueError::store_io(&self.path, e))
    }
}

impl KeyValueStore for FilePrefsStore {
    fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.cache.lock().get(key).copied())
    }

    fn put_i64(&self, key: &str, value: i64) -> Result<()> {
        let mut cache = self.cache.lock();
        let mut updated = cache.clone();
        updated.insert(key.to_string(), value);
        self.persist(&updated)?;
        *cache = updated;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store for hosts without a writable data directory and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, i64>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.entries.lock().get(key).copied())
    }

    fn put_i64(&self, key: &str, value: i64) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }
}
