//! Engine, store and dispatcher tests against the fake adapters

use std::sync::Arc;

use cab_translator::fake::{FakeDetector, FakeExemplifier, FakeExplainer, FakeLexicon, FakeTranslator};
use cab_types::LangTag;
use serde_json::Value;

use crate::engine::{Engine, Services};
use crate::state::LocalState;
use crate::store::{KeyValueStore, MemoryStore, StoreError};
use crate::Dispatcher;

mod state_tests;

pub(crate) fn tag(code: &str) -> LangTag {
    LangTag::parse(code).unwrap()
}

pub(crate) fn memory_state() -> Arc<LocalState> {
    Arc::new(LocalState::new(Arc::new(MemoryStore::new())))
}

/// One fake per adapter; override a field with struct update syntax
pub(crate) struct Fakes {
    pub detector: Arc<FakeDetector>,
    pub lexicon: Arc<FakeLexicon>,
    pub exemplifier: Arc<FakeExemplifier>,
    pub translator: Arc<FakeTranslator>,
    pub explainer: Arc<FakeExplainer>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            detector: Arc::new(FakeDetector::returning(tag("EN"))),
            lexicon: Arc::new(FakeLexicon::returning(vec![])),
            exemplifier: Arc::new(FakeExemplifier::new()),
            translator: Arc::new(FakeTranslator::returning("translated")),
            explainer: Arc::new(FakeExplainer::returning(&[])),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            detector: self.detector.clone(),
            lexicon: self.lexicon.clone(),
            exemplifier: self.exemplifier.clone(),
            translator: self.translator.clone(),
            explainer: self.explainer.clone(),
        }
    }

    pub fn engine(&self, state: Arc<LocalState>) -> Engine {
        Engine::new(self.services(), state)
    }

    pub fn dispatcher(&self, state: Arc<LocalState>) -> Dispatcher {
        Dispatcher::new(self.engine(state.clone()), state)
    }
}

/// Reads like an empty store, refuses every write
pub(crate) struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(format!("read-only, refused {key}")))
    }
}
