use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lang::{LangTag, SourceLang};

/// One sense returned by the dictionary, enriched with an example pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationCandidate {
    pub text: String,
    pub part_of_speech: Option<String>,
    pub synonyms: Vec<String>,
    pub source_example: Option<String>,
    pub target_example: Option<String>,
}

/// Result of a dictionary lookup. `candidates` is `None` when nothing was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryResult {
    pub source_word: String,
    pub source_lang: LangTag,
    pub target_lang: LangTag,
    pub candidates: Option<Vec<TranslationCandidate>>,
}

/// What caused a translation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Shortcut,
    Popup,
    Inline,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A completed plain translation, as kept in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationAction {
    pub id: String,
    pub original: String,
    pub translated_text: String,
    pub source_lang: SourceLang,
    pub target_lang: LangTag,
    pub trigger: Trigger,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl TranslationAction {
    pub fn new(
        original: impl Into<String>,
        translated_text: impl Into<String>,
        source_lang: SourceLang,
        target_lang: LangTag,
        trigger: Trigger,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            original: original.into(),
            translated_text: translated_text.into(),
            source_lang,
            target_lang,
            trigger,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Time-ordered id
    pub id: String,
    pub original: String,
    pub translation: String,
}

impl Flashcard {
    pub fn new(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            original: original.into(),
            translation: translation.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStatus {
    Ok,
    Empty,
    Error,
}

/// Last captured selection, kept so a freshly opened surface can pick it up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    pub trigger: Trigger,
    pub status: CaptureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: i64,
}
