use cab_config::Config;
use serde_json::json;

use crate::profile::{default_store_path, open_store};

#[test]
fn store_flag_opens_a_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let store = open_store(false, Some(path.clone()), &Config::default()).unwrap();
    store.set("flashcards", json!([])).unwrap();
    assert!(path.exists());

    let reopened = open_store(false, Some(path), &Config::default()).unwrap();
    assert_eq!(reopened.get("flashcards").unwrap(), Some(json!([])));
}

#[test]
fn configured_path_is_used_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("from-env.json");
    let config = Config {
        store_path: Some(path.display().to_string()),
        ..Config::default()
    };

    let store = open_store(false, None, &config).unwrap();
    store.set("options", json!({})).unwrap();
    assert!(path.exists());
}

#[test]
fn memory_flag_touches_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let store = open_store(true, Some(path.clone()), &Config::default()).unwrap();
    store.set("options", json!({})).unwrap();
    assert!(!path.exists());
}

#[test]
fn default_path_ends_in_store_json() {
    if let Some(path) = default_store_path() {
        assert!(path.ends_with("store.json"));
    }
}
