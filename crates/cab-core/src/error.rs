use cab_translator::ServiceError;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Dictionary lookup failed: {0}")]
    LookupFailed(#[source] ServiceError),

    #[error("Translation failed: {0}")]
    TranslationFailed(#[source] ServiceError),

    #[error("Explanation failed: {0}")]
    ExplanationFailed(#[source] ServiceError),

    #[error("Unknown message type.")]
    UnknownRequest(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
