use serde::{Deserialize, Serialize};

use crate::lang::{LangTag, SourceLang};
use crate::types::{AnalyzeRequest, DictionaryResult, Flashcard, TranslationAction, Trigger};

/// Message sent to the background side by any UI surface
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    Ping,
    GetDefinition {
        word: String,
        #[serde(default)]
        from: Option<SourceLang>,
        #[serde(default)]
        to: Option<LangTag>,
    },
    TranslateText(TranslateArgs),
    TranslatePopup(TranslateArgs),
    GetExplanation {
        text: String,
        #[serde(default)]
        source_lang: Option<SourceLang>,
        #[serde(default)]
        target_lang: Option<LangTag>,
        #[serde(default)]
        trigger: Option<Trigger>,
    },
    CreateFlashcard {
        #[serde(alias = "word")]
        original: String,
        translation: String,
    },
    GetLatestAnalyzeRequest,
    CaptureSelection(SelectionCapture),
    GetHistory {
        #[serde(default)]
        limit: Option<usize>,
    },
    GetFlashcards,
    #[serde(other)]
    Unknown,
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Ping => "PING",
            Request::GetDefinition { .. } => "GET_DEFINITION",
            Request::TranslateText(_) => "TRANSLATE_TEXT",
            Request::TranslatePopup(_) => "TRANSLATE_POPUP",
            Request::GetExplanation { .. } => "GET_EXPLANATION",
            Request::CreateFlashcard { .. } => "CREATE_FLASHCARD",
            Request::GetLatestAnalyzeRequest => "GET_LATEST_ANALYZE_REQUEST",
            Request::CaptureSelection(_) => "CAPTURE_SELECTION",
            Request::GetHistory { .. } => "GET_HISTORY",
            Request::GetFlashcards => "GET_FLASHCARDS",
            Request::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateArgs {
    pub text: String,
    #[serde(default)]
    pub source_lang: Option<SourceLang>,
    #[serde(default)]
    pub target_lang: Option<LangTag>,
    #[serde(default)]
    pub trigger: Option<Trigger>,
}

/// Selection handed over by the page side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionCapture {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub trigger: Option<Trigger>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub tab_url: Option<String>,
}

/// Exactly one of these is produced for every request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum Response {
    Pong {
        ok: bool,
        from: String,
    },
    Definition(DictionaryResult),
    Translation {
        translated_text: Option<String>,
    },
    Explanation {
        explanation: Option<String>,
    },
    FlashcardCreated {
        success: bool,
    },
    AnalyzeRequest {
        ok: bool,
        payload: Option<AnalyzeRequest>,
    },
    History {
        ok: bool,
        entries: Vec<TranslationAction>,
    },
    Flashcards {
        ok: bool,
        cards: Vec<Flashcard>,
    },
    Error {
        ok: bool,
        error: String,
    },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            ok: false,
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_kind_maps_to_unknown_variant() {
        let request: Request = serde_json::from_value(json!({ "kind": "NOPE" })).unwrap();
        assert_eq!(request, Request::Unknown);
    }

    #[test]
    fn flashcard_accepts_word_alias() {
        let request: Request = serde_json::from_value(json!({
            "kind": "CREATE_FLASHCARD",
            "word": "猫",
            "translation": "cat"
        }))
        .unwrap();

        assert_eq!(
            request,
            Request::CreateFlashcard {
                original: "猫".to_string(),
                translation: "cat".to_string(),
            }
        );
    }

    #[test]
    fn translate_fields_are_camel_case() {
        let request: Request = serde_json::from_value(json!({
            "kind": "TRANSLATE_POPUP",
            "text": "bonjour",
            "sourceLang": "auto",
            "targetLang": "en",
            "trigger": "inline"
        }))
        .unwrap();

        let Request::TranslatePopup(args) = request else {
            panic!("wrong variant");
        };
        assert_eq!(args.source_lang, Some(SourceLang::Auto));
        assert_eq!(args.target_lang.unwrap().as_str(), "EN");
        assert_eq!(args.trigger, Some(Trigger::Inline));
    }

    #[test]
    fn translation_response_shape() {
        let value = serde_json::to_value(Response::Translation {
            translated_text: None,
        })
        .unwrap();
        assert_eq!(value, json!({ "translatedText": null }));

        let value = serde_json::to_value(Response::error("Unknown message type.")).unwrap();
        assert_eq!(value, json!({ "ok": false, "error": "Unknown message type." }));
    }
}
