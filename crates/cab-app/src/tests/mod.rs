use std::sync::Arc;

use cab_config::Config;
use cab_core::{MemoryStore, Services};
use cab_translator::fake::{
    FakeDetector, FakeExemplifier, FakeExplainer, FakeLexicon, FakeTranslator,
};
use cab_types::LangTag;

use crate::state::AppState;

mod profile_tests;

fn en() -> LangTag {
    LangTag::en()
}

/// App state over fakes and an in-memory store
fn fake_state(lexicon: FakeLexicon, exemplifier: FakeExemplifier) -> Arc<AppState> {
    let services = Services {
        detector: Arc::new(FakeDetector::returning(en())),
        lexicon: Arc::new(lexicon),
        exemplifier: Arc::new(exemplifier),
        translator: Arc::new(FakeTranslator::returning("hello")),
        explainer: Arc::new(FakeExplainer::returning(&["ok"])),
    };

    Arc::new(AppState::with_services(
        Config::default(),
        services,
        Arc::new(MemoryStore::new()),
    ))
}
