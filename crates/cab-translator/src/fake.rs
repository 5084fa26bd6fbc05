//! Canned adapters for tests and offline runs.
//!
//! Each fake answers from data given at construction and records what it was
//! asked, so callers can assert on both the result and the calls made.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use cab_types::LangTag;

use crate::error::ServiceError;
use crate::{
    Detector, Example, ExampleQuery, Exemplifier, ExplainRequest, Explainer, Lexicon,
    ProviderMetadata, Sense, Translation, Translator,
};

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sense without part of speech or back translations
pub fn sense(text: &str) -> Sense {
    Sense {
        text: text.to_string(),
        part_of_speech: None,
        back_translations: vec![],
    }
}

pub fn example(source: &str, target: &str) -> Example {
    Example {
        source_sentence: source.to_string(),
        target_sentence: target.to_string(),
    }
}

pub struct FakeDetector {
    reply: Result<LangTag, ServiceError>,
    calls: AtomicUsize,
}

impl FakeDetector {
    pub fn returning(tag: LangTag) -> Self {
        Self {
            reply: Ok(tag),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: ServiceError) -> Self {
        Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Detector for FakeDetector {
    async fn detect(&self, _text: &str) -> Result<LangTag, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

pub struct FakeLexicon {
    reply: Result<Vec<Sense>, ServiceError>,
    requests: Mutex<Vec<(String, LangTag, LangTag)>>,
}

impl FakeLexicon {
    pub fn returning(senses: Vec<Sense>) -> Self {
        Self {
            reply: Ok(senses),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn failing(err: ServiceError) -> Self {
        Self {
            reply: Err(err),
            requests: Mutex::new(vec![]),
        }
    }

    /// (word, from, to) of every lookup so far
    pub fn requests(&self) -> Vec<(String, LangTag, LangTag)> {
        locked(&self.requests).clone()
    }
}

#[async_trait]
impl Lexicon for FakeLexicon {
    async fn lookup(
        &self,
        word: &str,
        from: &LangTag,
        to: &LangTag,
    ) -> Result<Vec<Sense>, ServiceError> {
        locked(&self.requests).push((word.to_string(), from.clone(), to.clone()));
        self.reply.clone()
    }
}

/// Answers per sense text; texts without a reply get no examples
#[derive(Default)]
pub struct FakeExemplifier {
    replies: HashMap<String, Result<Vec<Example>, ServiceError>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    queries: Mutex<Vec<ExampleQuery>>,
}

impl FakeExemplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, reply: Result<Vec<Example>, ServiceError>) -> Self {
        self.replies.insert(text.to_string(), reply);
        self
    }

    /// Hold every call open for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Highest number of calls that were open at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<ExampleQuery> {
        locked(&self.queries).clone()
    }
}

#[async_trait]
impl Exemplifier for FakeExemplifier {
    async fn examples(&self, query: &ExampleQuery) -> Result<Vec<Example>, ServiceError> {
        locked(&self.queries).push(query.clone());

        let open = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(open, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.replies
            .get(&query.text)
            .cloned()
            .unwrap_or_else(|| Ok(vec![]))
    }
}

pub struct FakeTranslator {
    reply: Result<String, ServiceError>,
    detected: Option<LangTag>,
    calls: Mutex<Vec<(String, Option<LangTag>, LangTag)>>,
}

impl FakeTranslator {
    pub fn returning(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            detected: None,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn failing(err: ServiceError) -> Self {
        Self {
            reply: Err(err),
            detected: None,
            calls: Mutex::new(vec![]),
        }
    }

    /// Report this as the detected source when none is given
    pub fn detecting(mut self, tag: LangTag) -> Self {
        self.detected = Some(tag);
        self
    }

    /// (text, from, to) of every call so far
    pub fn calls(&self) -> Vec<(String, Option<LangTag>, LangTag)> {
        locked(&self.calls).clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        from: Option<&LangTag>,
        to: &LangTag,
    ) -> Result<Translation, ServiceError> {
        locked(&self.calls).push((text.to_string(), from.cloned(), to.clone()));

        let text = self.reply.clone()?;
        Ok(Translation {
            text,
            from: from.cloned().or_else(|| self.detected.clone()),
            to: to.clone(),
            provider: "fake".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Fake".to_string(),
        }
    }
}

pub struct FakeExplainer {
    reply: Result<Vec<String>, ServiceError>,
    requests: Mutex<Vec<ExplainRequest>>,
}

impl FakeExplainer {
    pub fn returning(segments: &[&str]) -> Self {
        Self {
            reply: Ok(segments.iter().map(|s| s.to_string()).collect()),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn failing(err: ServiceError) -> Self {
        Self {
            reply: Err(err),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<ExplainRequest> {
        locked(&self.requests).clone()
    }
}

#[async_trait]
impl Explainer for FakeExplainer {
    async fn explain(&self, request: &ExplainRequest) -> Result<Vec<String>, ServiceError> {
        locked(&self.requests).push(request.clone());
        self.reply.clone()
    }
}
