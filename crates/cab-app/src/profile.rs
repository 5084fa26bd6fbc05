use std::path::PathBuf;
use std::sync::Arc;

use cab_config::Config;
use cab_core::{JsonFileStore, KeyValueStore, MemoryStore};
use directories::ProjectDirs;

const STORE_FILE: &str = "store.json";

/// `store.json` in the platform data dir
pub fn default_store_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cab").map(|dirs| dirs.data_dir().join(STORE_FILE))
}

/// Pick the store backend.
///
/// `--memory` wins, then `--store`, then `CAB_STORE_PATH`, then the platform
/// data dir. Without a home directory we fall back to memory.
pub fn open_store(
    memory: bool,
    store: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if memory {
        tracing::info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let path = store
        .or_else(|| config.store_path.as_ref().map(PathBuf::from))
        .or_else(default_store_path);

    match path {
        Some(path) => Ok(Arc::new(JsonFileStore::open(path)?)),
        None => {
            tracing::warn!("No data directory found, using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
