//! Subsystem status map and its best-effort persistence.
//!
//! The map is the only state that outlives a play session. It is stored as a
//! single JSON object under one key of a [`KvStore`]; reads and writes never
//! fail the game, they log a warning and carry on.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::applier::StatusUpdate;
use crate::config::PROMPTS;
use crate::constants::STATUS_KEY;

/// Subsystem name → status, both upper-case.
pub type StatusMap = BTreeMap<String, String>;

/// The three subsystems every session starts with.
pub fn default_status_map() -> StatusMap {
    PROMPTS.default_statuses.iter().map(|(k, v)| (k.to_uppercase(), v.to_uppercase())).collect()
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum StoreError {
    /// Storage could not be read or written
    Io(String),
    /// Stored value is not a JSON object of strings
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "Storage error: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "Corrupt stored value: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

// ============================================================================
// Key-value capability
// ============================================================================

/// Local persistent key-value storage holding string values.
pub trait KvStore: Send {
    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Temp file + rename: readers never see a partial write.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same entries, which lets a test hand one
/// clone to a [`StatusStore`] and inspect the other.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose reads always fail.
    pub fn failing_reads() -> Self {
        Self { fail_reads: true, ..Self::default() }
    }

    /// A store whose writes always fail.
    pub fn failing_writes() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|e| e.get(key).cloned())
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Io("read refused".to_string()));
        }
        let entries = self.entries.lock().map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io("write refused".to_string()));
        }
        let mut entries = self.entries.lock().map_err(|e| StoreError::Io(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// Load / save
// ============================================================================

fn read_stored(kv: &dyn KvStore) -> Result<Option<StatusMap>, StoreError> {
    let Some(raw) = kv.get(STATUS_KEY)? else {
        return Ok(None);
    };
    let stored: BTreeMap<String, String> =
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    Ok(Some(stored.into_iter().map(|(k, v)| (k.to_uppercase(), v.to_uppercase())).collect()))
}

/// Stored entries merged over the defaults (stored values win). Missing,
/// corrupt or unreadable storage yields the defaults.
pub fn load_status_map(kv: &dyn KvStore) -> StatusMap {
    let mut map = default_status_map();
    match read_stored(kv) {
        Ok(Some(stored)) => map.extend(stored),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "status store unreadable, using defaults"),
    }
    map
}

/// Write the full map. Failures are logged and otherwise ignored.
pub fn save_status_map(kv: &mut dyn KvStore, map: &StatusMap) {
    let json = match serde_json::to_string(map) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "status map not serializable");
            return;
        }
    };
    if let Err(e) = kv.set(STATUS_KEY, &json) {
        tracing::warn!(error = %e, "status store write failed");
    }
}

// ============================================================================
// Store
// ============================================================================

/// The live status map plus the storage it is persisted to.
pub struct StatusStore {
    map: StatusMap,
    kv: Box<dyn KvStore>,
}

impl StatusStore {
    pub fn load(kv: Box<dyn KvStore>) -> Self {
        let map = load_status_map(kv.as_ref());
        Self { map, kv }
    }

    pub fn map(&self) -> &StatusMap {
        &self.map
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(&key.to_uppercase()).map(|s| s.as_str())
    }

    /// Overwrite entries with `updates` and persist immediately.
    pub fn apply(&mut self, updates: impl IntoIterator<Item = StatusUpdate>) {
        for update in updates {
            self.map.insert(update.key, update.status);
        }
        self.save();
    }

    /// Set one entry, normalizing case, and persist.
    pub fn set(&mut self, key: &str, status: &str) {
        self.apply([StatusUpdate::new(key, status)]);
    }

    pub fn save(&mut self) {
        save_status_map(self.kv.as_mut(), &self.map);
    }
}

#[cfg(test)]
mod tests;
