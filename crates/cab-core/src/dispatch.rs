use std::sync::Arc;

use cab_types::{
    AnalyzeRequest, CaptureStatus, LangTag, Request, Response, SelectionCapture, SourceLang,
    TranslateArgs, TranslationAction, Trigger,
};
use serde_json::Value;

use crate::engine::Engine;
use crate::error::CoreError;
use crate::state::{HISTORY_LIMIT, LocalState};

/// Pages content scripts cannot run on
const BLOCKED_URL_PREFIXES: [&str; 6] = [
    "chrome://",
    "edge://",
    "about:",
    "chrome-extension://",
    "moz-extension://",
    "devtools://",
];

const UNSUPPORTED_PAGE: &str = "This page is not supported by Chrome extensions.";

/// Single entry point for every UI surface.
///
/// Each request is routed to exactly one handler and always yields exactly
/// one [`Response`]; failures come back as typed error responses.
pub struct Dispatcher {
    engine: Engine,
    state: Arc<LocalState>,
}

impl Dispatcher {
    pub fn new(engine: Engine, state: Arc<LocalState>) -> Self {
        Self { engine, state }
    }

    /// Decode a raw message and dispatch it
    pub async fn handle_value(&self, raw: Value) -> Response {
        let Some(kind) = raw.get("kind").and_then(Value::as_str).map(str::to_owned) else {
            tracing::warn!("[DISPATCH] message without a kind");
            return Response::error(CoreError::UnknownRequest(String::new()).to_string());
        };

        match serde_json::from_value::<Request>(raw) {
            Ok(Request::Unknown) => {
                tracing::warn!("[DISPATCH] unknown message kind '{kind}'");
                Response::error(CoreError::UnknownRequest(kind).to_string())
            }
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                tracing::warn!("[DISPATCH] {kind}: undecodable message: {e}");
                Response::error(CoreError::Validation(e.to_string()).to_string())
            }
        }
    }

    pub async fn dispatch(&self, request: Request) -> Response {
        let kind = request.kind();
        tracing::debug!("[DISPATCH] {kind}");

        match request {
            Request::Ping => Response::Pong {
                ok: true,
                from: "background".to_string(),
            },
            Request::GetDefinition { word, from, to } => {
                match self.engine.lookup_definition(&word, from, to).await {
                    Ok(result) => Response::Definition(result),
                    Err(e) => {
                        tracing::error!("[DISPATCH] {kind} failed: {e}");
                        Response::error(e.to_string())
                    }
                }
            }
            Request::TranslateText(args) => self.translate(kind, args, Trigger::Unknown).await,
            Request::TranslatePopup(args) => self.translate(kind, args, Trigger::Popup).await,
            Request::GetExplanation {
                text,
                source_lang,
                target_lang,
                trigger,
            } => {
                self.explain(kind, &text, source_lang, target_lang, trigger)
                    .await
            }
            Request::CreateFlashcard {
                original,
                translation,
            } => self.create_flashcard(kind, &original, &translation),
            Request::GetLatestAnalyzeRequest => match self.state.latest_analyze_request() {
                Ok(payload) => Response::AnalyzeRequest { ok: true, payload },
                Err(e) => self.store_failure(kind, e.into()),
            },
            Request::CaptureSelection(capture) => self.capture_selection(kind, capture),
            Request::GetHistory { limit } => {
                match self.state.list_history(limit.unwrap_or(HISTORY_LIMIT)) {
                    Ok(entries) => Response::History { ok: true, entries },
                    Err(e) => self.store_failure(kind, e.into()),
                }
            }
            Request::GetFlashcards => match self.state.list_flashcards() {
                Ok(cards) => Response::Flashcards { ok: true, cards },
                Err(e) => self.store_failure(kind, e.into()),
            },
            Request::Unknown => {
                tracing::warn!("[DISPATCH] unknown message kind");
                Response::error(CoreError::UnknownRequest(kind.to_string()).to_string())
            }
        }
    }

    async fn translate(&self, kind: &str, args: TranslateArgs, default_trigger: Trigger) -> Response {
        let trigger = args.trigger.unwrap_or(default_trigger);

        match self
            .engine
            .translate_plain(&args.text, args.source_lang, args.target_lang)
            .await
        {
            Ok(translation) => {
                let source = translation
                    .from
                    .clone()
                    .map(SourceLang::Tag)
                    .unwrap_or(SourceLang::Auto);
                self.record(
                    kind,
                    TranslationAction::new(
                        args.text.trim(),
                        translation.text.as_str(),
                        source,
                        translation.to,
                        trigger,
                    ),
                );

                Response::Translation {
                    translated_text: Some(translation.text),
                }
            }
            Err(e) => {
                tracing::error!("[DISPATCH] {kind} failed: {e}");
                Response::Translation {
                    translated_text: None,
                }
            }
        }
    }

    async fn explain(
        &self,
        kind: &str,
        text: &str,
        source: Option<SourceLang>,
        target: Option<LangTag>,
        trigger: Option<Trigger>,
    ) -> Response {
        match self.engine.explain(text, source, target).await {
            Ok(explanation) => {
                self.record(
                    kind,
                    TranslationAction::new(
                        text.trim(),
                        explanation.text.as_str(),
                        SourceLang::Tag(explanation.source_lang),
                        explanation.target_lang,
                        trigger.unwrap_or_default(),
                    ),
                );

                Response::Explanation {
                    explanation: Some(explanation.text),
                }
            }
            Err(e) => {
                tracing::error!("[DISPATCH] {kind} failed: {e}");
                Response::Explanation { explanation: None }
            }
        }
    }

    /// History is a side effect; failing to write it never changes the reply
    fn record(&self, kind: &str, action: TranslationAction) {
        match self.state.append_history(action) {
            Ok(true) => tracing::debug!("[DISPATCH] {kind}: history appended"),
            Ok(false) => tracing::debug!("[DISPATCH] {kind}: blank entry not recorded"),
            Err(e) => tracing::warn!("[DISPATCH] {kind}: history append failed: {e}"),
        }
    }

    fn create_flashcard(&self, kind: &str, original: &str, translation: &str) -> Response {
        let (original, translation) = (original.trim(), translation.trim());
        if original.is_empty() || translation.is_empty() {
            let err = CoreError::Validation("flashcard needs both sides".to_string());
            tracing::warn!("[DISPATCH] {kind}: {err}");
            return Response::FlashcardCreated { success: false };
        }

        match self.state.add_flashcard(original, translation) {
            Ok(card) => {
                tracing::info!("[DISPATCH] flashcard {} created", card.id);
                Response::FlashcardCreated { success: true }
            }
            Err(e) => {
                tracing::error!("[DISPATCH] {kind} failed: {e}");
                Response::FlashcardCreated { success: false }
            }
        }
    }

    fn capture_selection(&self, kind: &str, capture: SelectionCapture) -> Response {
        let trigger = capture.trigger.unwrap_or_default();
        let timestamp = chrono::Utc::now().timestamp_millis();
        let unsupported = capture
            .tab_url
            .as_deref()
            .is_some_and(|url| !is_supported_url(url));

        let payload = if unsupported {
            AnalyzeRequest {
                text: String::new(),
                trigger,
                status: CaptureStatus::Error,
                source: None,
                tab_url: capture.tab_url,
                error: Some(UNSUPPORTED_PAGE.to_string()),
                timestamp,
            }
        } else {
            let text = capture.text.trim().to_string();
            AnalyzeRequest {
                status: if text.is_empty() {
                    CaptureStatus::Empty
                } else {
                    CaptureStatus::Ok
                },
                text,
                trigger,
                source: Some(capture.source.unwrap_or_else(|| "selection".to_string())),
                tab_url: capture.tab_url,
                error: None,
                timestamp,
            }
        };

        match self.state.record_analyze_request(&payload) {
            Ok(()) => {
                tracing::info!("[DISPATCH] selection captured: status={:?}", payload.status);
                Response::AnalyzeRequest {
                    ok: true,
                    payload: Some(payload),
                }
            }
            Err(e) => self.store_failure(kind, e.into()),
        }
    }

    fn store_failure(&self, kind: &str, err: CoreError) -> Response {
        tracing::error!("[DISPATCH] {kind} failed: {err}");
        Response::error(err.to_string())
    }
}

fn is_supported_url(url: &str) -> bool {
    !BLOCKED_URL_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}
