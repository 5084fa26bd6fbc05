use std::sync::Arc;

use cab_config::Options;
use cab_types::{SourceLang, TranslationAction, Trigger};

use super::{memory_state, tag};
use crate::store::{HISTORY_KEY, JsonFileStore, KeyValueStore, MemoryStore, OPTIONS_KEY};
use crate::{HISTORY_LIMIT, LocalState};

fn action(original: &str, translated: &str) -> TranslationAction {
    TranslationAction::new(
        original,
        translated,
        SourceLang::Auto,
        tag("EN"),
        Trigger::Shortcut,
    )
}

#[test]
fn history_keeps_the_newest_thirty() {
    let state = memory_state();

    for i in 0..=HISTORY_LIMIT {
        assert!(state.append_history(action(&format!("word {i}"), "x")).unwrap());
    }

    let history = state.list_history(usize::MAX).unwrap();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert!(history.iter().all(|entry| entry.original != "word 0"));
    assert!(history.iter().any(|entry| entry.original == "word 30"));
}

#[test]
fn blank_history_entries_are_skipped() {
    let state = memory_state();
    state.append_history(action("chat", "cat")).unwrap();

    assert!(!state.append_history(action("   ", "cat")).unwrap());
    assert!(!state.append_history(action("chat", "\n\t")).unwrap());

    let history = state.list_history(HISTORY_LIMIT).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].original, "chat");
}

#[test]
fn history_lists_newest_timestamp_first() {
    let state = memory_state();

    let mut older = action("older", "a");
    older.timestamp = 1_000;
    let mut newest = action("newest", "b");
    newest.timestamp = 3_000;
    let mut middle = action("middle", "c");
    middle.timestamp = 2_000;

    // Insertion order deliberately differs from timestamp order
    state.append_history(older).unwrap();
    state.append_history(newest).unwrap();
    state.append_history(middle).unwrap();

    let originals: Vec<_> = state
        .list_history(HISTORY_LIMIT)
        .unwrap()
        .into_iter()
        .map(|entry| entry.original)
        .collect();
    assert_eq!(originals, vec!["newest", "middle", "older"]);

    assert_eq!(state.list_history(1).unwrap()[0].original, "newest");
}

#[test]
fn history_is_stored_in_insertion_order() {
    let store = Arc::new(MemoryStore::new());
    let state = LocalState::new(store.clone());

    state.append_history(action("first", "1")).unwrap();
    state.append_history(action("second", "2")).unwrap();

    let stored: Vec<TranslationAction> =
        serde_json::from_value(store.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored[0].original, "second");
    assert_eq!(stored[1].original, "first");
}

#[test]
fn flashcards_append_in_order() {
    let state = memory_state();

    let first = state.add_flashcard("猫", "cat").unwrap();
    let second = state.add_flashcard("犬", "dog").unwrap();
    assert_ne!(first.id, second.id);

    let cards = state.list_flashcards().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].original, "猫");
    assert_eq!(cards[0].translation, "cat");
    assert_eq!(cards[1].original, "犬");
}

#[test]
fn default_options_do_not_overwrite_saved_ones() {
    let store = Arc::new(MemoryStore::new());
    let state = LocalState::new(store.clone());

    let saved = Options {
        target_lang: tag("JA"),
        debug_mode: true,
        ..Options::default()
    };
    store
        .set(OPTIONS_KEY, serde_json::to_value(&saved).unwrap())
        .unwrap();

    assert_eq!(state.ensure_default_options().unwrap(), saved);
    assert_eq!(state.options().unwrap(), saved);
}

#[test]
fn default_options_are_written_on_first_run() {
    let store = Arc::new(MemoryStore::new());
    let state = LocalState::new(store.clone());

    assert!(store.get(OPTIONS_KEY).unwrap().is_none());
    assert_eq!(state.ensure_default_options().unwrap(), Options::default());
    assert!(store.get(OPTIONS_KEY).unwrap().is_some());
}

#[test]
fn latest_analyze_request_starts_empty() {
    let state = memory_state();
    assert_eq!(state.latest_analyze_request().unwrap(), None);
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile").join("store.json");

    {
        let state = LocalState::new(Arc::new(JsonFileStore::open(&path).unwrap()));
        state.ensure_default_options().unwrap();
        state.append_history(action("chat", "cat")).unwrap();
        state.add_flashcard("chat", "cat").unwrap();
    }

    assert!(path.exists());

    let state = LocalState::new(Arc::new(JsonFileStore::open(&path).unwrap()));
    assert_eq!(state.options().unwrap(), Options::default());
    assert_eq!(state.list_history(HISTORY_LIMIT).unwrap()[0].original, "chat");
    assert_eq!(state.list_flashcards().unwrap()[0].translation, "cat");
}

#[test]
fn file_store_rejects_corrupt_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(JsonFileStore::open(&path).is_err());
}

#[test]
fn failed_file_write_leaves_no_entry_behind() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("profile");
    let store = Arc::new(JsonFileStore::open(profile.join("store.json")).unwrap());
    let state = LocalState::new(store.clone());

    std::fs::remove_dir_all(&profile).unwrap();

    assert!(state.append_history(action("chat", "cat")).is_err());
    assert!(state.list_history(HISTORY_LIMIT).unwrap().is_empty());
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
}
