pub mod lang;
pub mod message;
pub mod types;

pub use lang::{LangTag, LangTagError, SourceLang};
pub use message::{Request, Response, SelectionCapture, TranslateArgs};
pub use types::{
    AnalyzeRequest, CaptureStatus, DictionaryResult, Flashcard, TranslationAction,
    TranslationCandidate, Trigger,
};
