use cab_types::{LangTag, SourceLang};
use serde::{Deserialize, Serialize};

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_explanation_style() -> String {
    "concise".to_string()
}

fn default_youtube_fallback() -> bool {
    true
}

/// User options persisted under the `options` key.
///
/// Written once with defaults on first run, edited only by the settings
/// surface afterwards. The engine reads `source_lang`/`target_lang` whenever a
/// request leaves them out.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub source_lang: SourceLang,
    #[serde(default = "LangTag::en")]
    pub target_lang: LangTag,
    #[serde(default = "default_explanation_style")]
    pub explanation_style: String,
    #[serde(default = "default_youtube_fallback")]
    pub youtube_fallback: bool,
    #[serde(default)]
    pub debug_mode: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            source_lang: SourceLang::Auto,
            target_lang: LangTag::en(),
            explanation_style: default_explanation_style(),
            youtube_fallback: default_youtube_fallback(),
            debug_mode: false,
        }
    }
}
