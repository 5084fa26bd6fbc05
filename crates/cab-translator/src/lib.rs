use cab_types::LangTag;

pub mod deepl;
pub mod error;
pub mod explainer;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod http;
pub mod microsoft;

#[cfg(test)]
mod tests;

pub use deepl::DeepLTranslator;
pub use error::{FailureKind, ServiceError};
pub use explainer::ChatExplainer;
pub use http::HttpClient;
pub use microsoft::MicrosoftDictionary;

/// Language identification
#[async_trait::async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<LangTag, ServiceError>;
}

/// Dictionary lookup: word -> senses in the target language
#[async_trait::async_trait]
pub trait Lexicon: Send + Sync {
    async fn lookup(
        &self,
        word: &str,
        from: &LangTag,
        to: &LangTag,
    ) -> Result<Vec<Sense>, ServiceError>;
}

/// Example sentences for one (word, translation) pair
#[async_trait::async_trait]
pub trait Exemplifier: Send + Sync {
    async fn examples(&self, query: &ExampleQuery) -> Result<Vec<Example>, ServiceError>;
}

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text; `from = None` lets the provider detect the source
    async fn translate(
        &self,
        text: &str,
        from: Option<&LangTag>,
        to: &LangTag,
    ) -> Result<Translation, ServiceError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Generative explanation provider
#[async_trait::async_trait]
pub trait Explainer: Send + Sync {
    /// Text segments of the reply, in the order the service produced them
    async fn explain(&self, request: &ExplainRequest) -> Result<Vec<String>, ServiceError>;
}

/// One translation meaning of a looked-up word
#[derive(Debug, Clone, PartialEq)]
pub struct Sense {
    pub text: String,
    pub part_of_speech: Option<String>,
    /// Words in the source language that translate back to `text`
    pub back_translations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExampleQuery {
    /// Sense text, in `to`
    pub text: String,
    /// The originally looked-up word, in `from`
    pub translation: String,
    pub from: LangTag,
    pub to: LangTag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Sentence in the looked-up word's language
    pub source_sentence: String,
    /// Same sentence in the target language
    pub target_sentence: String,
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    /// Source language, as given or as detected by the provider
    pub from: Option<LangTag>,
    pub to: LangTag,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplainRequest {
    /// Base URL of the chat proxy, taken from the user options
    pub api_base_url: String,
    pub prompt: String,
}
