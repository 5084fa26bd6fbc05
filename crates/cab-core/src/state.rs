use std::sync::{Arc, Mutex};

use cab_config::Options;
use cab_types::{AnalyzeRequest, Flashcard, TranslationAction};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::{
    FLASHCARDS_KEY, HISTORY_KEY, KeyValueStore, LATEST_REQUEST_KEY, OPTIONS_KEY, StoreError,
};

/// Most recent translations kept in history
pub const HISTORY_LIMIT: usize = 30;

/// Typed view over the store: options, translation history, flashcards and
/// the last captured selection.
///
/// Every read-modify-write runs under `write_lock` and contains no `.await`,
/// so two appends dispatched back to back cannot lose each other's entry.
pub struct LocalState {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl LocalState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.store.set(key, serde_json::to_value(value)?)
    }

    /// Write default options unless some are already stored
    pub fn ensure_default_options(&self) -> Result<Options, StoreError> {
        let _guard = self.write_lock.lock()?;

        if let Some(options) = self.read::<Options>(OPTIONS_KEY)? {
            return Ok(options);
        }

        let options = Options::default();
        self.write(OPTIONS_KEY, &options)?;
        tracing::info!("Default options initialized");
        Ok(options)
    }

    pub fn options(&self) -> Result<Options, StoreError> {
        Ok(self.read(OPTIONS_KEY)?.unwrap_or_default())
    }

    /// Prepend `action` and keep the newest [`HISTORY_LIMIT`] insertions.
    /// Returns `false` without touching the log when either text is blank.
    pub fn append_history(&self, action: TranslationAction) -> Result<bool, StoreError> {
        if action.original.trim().is_empty() || action.translated_text.trim().is_empty() {
            return Ok(false);
        }

        let _guard = self.write_lock.lock()?;

        let mut log: Vec<TranslationAction> = self.read(HISTORY_KEY)?.unwrap_or_default();
        log.insert(0, action);
        log.truncate(HISTORY_LIMIT);
        self.write(HISTORY_KEY, &log)?;

        Ok(true)
    }

    /// History newest first by timestamp.
    ///
    /// Storage order is insertion order, which can differ from timestamp
    /// order for backfilled entries, so this always re-sorts.
    pub fn list_history(&self, limit: usize) -> Result<Vec<TranslationAction>, StoreError> {
        let mut log: Vec<TranslationAction> = self.read(HISTORY_KEY)?.unwrap_or_default();
        log.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        log.truncate(limit);
        Ok(log)
    }

    pub fn add_flashcard(&self, original: &str, translation: &str) -> Result<Flashcard, StoreError> {
        let card = Flashcard::new(original, translation);

        let _guard = self.write_lock.lock()?;

        let mut cards: Vec<Flashcard> = self.read(FLASHCARDS_KEY)?.unwrap_or_default();
        cards.push(card.clone());
        self.write(FLASHCARDS_KEY, &cards)?;

        Ok(card)
    }

    pub fn list_flashcards(&self) -> Result<Vec<Flashcard>, StoreError> {
        Ok(self.read(FLASHCARDS_KEY)?.unwrap_or_default())
    }

    pub fn latest_analyze_request(&self) -> Result<Option<AnalyzeRequest>, StoreError> {
        self.read(LATEST_REQUEST_KEY)
    }

    pub fn record_analyze_request(&self, payload: &AnalyzeRequest) -> Result<(), StoreError> {
        self.write(LATEST_REQUEST_KEY, payload)
    }
}
