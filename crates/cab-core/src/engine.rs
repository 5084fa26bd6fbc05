use std::collections::HashSet;
use std::sync::Arc;

use cab_config::Options;
use cab_translator::{
    Detector, ExampleQuery, Exemplifier, ExplainRequest, Explainer, Lexicon, Sense, Translation,
    Translator,
};
use cab_types::{DictionaryResult, LangTag, SourceLang, TranslationCandidate};
use futures_util::future::join_all;

use crate::error::CoreError;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::state::LocalState;

/// The external adapters the engine orchestrates
#[derive(Clone)]
pub struct Services {
    pub detector: Arc<dyn Detector>,
    pub lexicon: Arc<dyn Lexicon>,
    pub exemplifier: Arc<dyn Exemplifier>,
    pub translator: Arc<dyn Translator>,
    pub explainer: Arc<dyn Explainer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub text: String,
    pub source_lang: LangTag,
    pub target_lang: LangTag,
}

/// Aggregation engine.
///
/// Dictionary lookup is the one hard dependency of a definition; detection
/// and example sentences degrade the result instead of failing it.
pub struct Engine {
    services: Services,
    state: Arc<LocalState>,
}

impl Engine {
    pub fn new(services: Services, state: Arc<LocalState>) -> Self {
        Self { services, state }
    }

    fn options(&self) -> Options {
        self.state.options().unwrap_or_else(|e| {
            tracing::warn!("[ENGINE] options unreadable, using defaults: {e}");
            Options::default()
        })
    }

    /// Fill in whichever side of the pair the request left out
    fn language_pair(
        &self,
        source: Option<SourceLang>,
        target: Option<LangTag>,
    ) -> (SourceLang, LangTag) {
        match (source, target) {
            (Some(source), Some(target)) => (source, target),
            (source, target) => {
                let options = self.options();
                (
                    source.unwrap_or(options.source_lang),
                    target.unwrap_or(options.target_lang),
                )
            }
        }
    }

    async fn resolve_source(&self, text: &str, source: SourceLang) -> LangTag {
        match source {
            SourceLang::Tag(tag) => tag,
            SourceLang::Auto => match self.services.detector.detect(text).await {
                Ok(tag) => {
                    tracing::debug!("[ENGINE] detected {tag} for '{text}'");
                    tag
                }
                Err(e) => {
                    tracing::warn!(
                        "[ENGINE] step=detect kind={:?} falling back to EN: {e}",
                        e.kind()
                    );
                    LangTag::en()
                }
            },
        }
    }

    pub async fn lookup_definition(
        &self,
        word: &str,
        source: Option<SourceLang>,
        target: Option<LangTag>,
    ) -> Result<DictionaryResult, CoreError> {
        let word = DefaultPreprocessor.process(word);
        if word.is_empty() {
            return Err(CoreError::Validation("word must not be empty".to_string()));
        }

        let (source, target) = self.language_pair(source, target);
        let source = self.resolve_source(&word, source).await;

        let senses = self
            .services
            .lexicon
            .lookup(&word, &source, &target)
            .await
            .map_err(|e| {
                tracing::error!(
                    "[ENGINE] step=lookup kind={:?} word='{word}' {source}->{target}: {e}",
                    e.kind()
                );
                CoreError::LookupFailed(e)
            })?;

        tracing::debug!("[ENGINE] '{word}': {} senses", senses.len());

        let candidates = if senses.is_empty() {
            None
        } else {
            Some(self.enrich(&word, &source, &target, senses).await)
        };

        Ok(DictionaryResult {
            source_word: word,
            source_lang: source,
            target_lang: target,
            candidates,
        })
    }

    /// One example lookup per sense, all in flight together. Output keeps
    /// the lexicon's order whatever order the calls finish in.
    async fn enrich(
        &self,
        word: &str,
        source: &LangTag,
        target: &LangTag,
        senses: Vec<Sense>,
    ) -> Vec<TranslationCandidate> {
        let queries: Vec<ExampleQuery> = senses
            .iter()
            .map(|sense| ExampleQuery {
                text: sense.text.clone(),
                translation: word.to_string(),
                from: source.clone(),
                to: target.clone(),
            })
            .collect();

        let outcomes = join_all(
            queries
                .iter()
                .map(|query| self.services.exemplifier.examples(query)),
        )
        .await;

        senses
            .into_iter()
            .zip(outcomes)
            .map(|(sense, outcome)| {
                let mut candidate = candidate_from(word, sense);
                match outcome {
                    Ok(examples) => {
                        if let Some(first) = examples.into_iter().next() {
                            candidate.source_example = Some(first.source_sentence);
                            candidate.target_example = Some(first.target_sentence);
                        }
                    }
                    Err(e) => tracing::warn!(
                        "[ENGINE] step=examples kind={:?} candidate='{}': {e}",
                        e.kind(),
                        candidate.text
                    ),
                }
                candidate
            })
            .collect()
    }

    pub async fn translate_plain(
        &self,
        text: &str,
        source: Option<SourceLang>,
        target: Option<LangTag>,
    ) -> Result<Translation, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::Validation("text must not be empty".to_string()));
        }

        let (source, target) = self.language_pair(source, target);

        self.services
            .translator
            .translate(text, source.tag(), &target)
            .await
            .inspect(|translation| {
                tracing::debug!(
                    "[ENGINE] step=translate provider={} {:?}->{}",
                    translation.provider,
                    translation.from,
                    translation.to
                );
            })
            .map_err(|e| {
                tracing::error!(
                    "[ENGINE] step=translate provider={} kind={:?}: {e}",
                    self.services.translator.metadata().name,
                    e.kind()
                );
                CoreError::TranslationFailed(e)
            })
    }

    pub async fn explain(
        &self,
        text: &str,
        source: Option<SourceLang>,
        target: Option<LangTag>,
    ) -> Result<Explanation, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::Validation("text must not be empty".to_string()));
        }

        let options = self.options();
        let source = source.unwrap_or(options.source_lang);
        let target = target.unwrap_or(options.target_lang);
        let source = self.resolve_source(text, source).await;

        let request = ExplainRequest {
            api_base_url: options.api_base_url,
            prompt: explanation_prompt(text, &source, &target, &options.explanation_style),
        };

        let segments = self
            .services
            .explainer
            .explain(&request)
            .await
            .map_err(|e| {
                tracing::error!("[ENGINE] step=explain kind={:?}: {e}", e.kind());
                CoreError::ExplanationFailed(e)
            })?;

        Ok(Explanation {
            text: segments.concat(),
            source_lang: source,
            target_lang: target,
        })
    }
}

fn candidate_from(word: &str, sense: Sense) -> TranslationCandidate {
    let word = word.to_lowercase();
    let mut seen = HashSet::new();

    let synonyms = sense
        .back_translations
        .into_iter()
        .filter(|s| {
            let key = s.trim().to_lowercase();
            !key.is_empty() && key != word && seen.insert(key)
        })
        .collect();

    TranslationCandidate {
        text: sense.text,
        part_of_speech: sense.part_of_speech,
        synonyms,
        source_example: None,
        target_example: None,
    }
}

fn explanation_prompt(text: &str, source: &LangTag, target: &LangTag, style: &str) -> String {
    format!(
        "You are a language tutor. Explain the meaning and the grammar of the following \
         phrase written in language {source}. Write the explanation in language {target} \
         and keep it {style}.\n\nPhrase: {text}"
    )
}
