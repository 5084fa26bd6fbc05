use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use serde_json::{Map, Value};

pub const OPTIONS_KEY: &str = "options";
pub const HISTORY_KEY: &str = "translationHistory";
pub const FLASHCARDS_KEY: &str = "flashcards";
pub const LATEST_REQUEST_KEY: &str = "latestAnalyzeRequest";

/// Persistent key-value capability injected into [`crate::LocalState`]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

/// Process-lifetime store, nothing survives a restart
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write()?.insert(key.to_string(), value);
        Ok(())
    }
}

/// All keys in one JSON object on disk, rewritten on every `set`.
///
/// Writes are synchronous and run on the caller's thread under the map lock.
/// Store files stay small (history is capped, flashcards are short strings),
/// so this stays below a millisecond in practice.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let data = fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                Map::new()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            Map::new()
        };

        tracing::info!("Opened store at {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn flush(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        // Replace through a sibling file so readers never see a partial write
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    /// The in-memory map only changes once the file write succeeded
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.write()?;

        let mut updated = entries.clone();
        updated.insert(key.to_string(), value);
        self.flush(&updated)?;

        *entries = updated;
        Ok(())
    }
}
