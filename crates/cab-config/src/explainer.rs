use std::env;

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_chat_path() -> String {
    "/api/chat".to_string()
}

/// Generative explanation service, reached through the chat proxy at `Options::api_base_url`
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ExplainerConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
}

impl ExplainerConfig {
    pub fn new() -> Self {
        Self {
            model: env::var("EXPLAINER_MODEL").unwrap_or_else(|_| default_model()),
            chat_path: default_chat_path(),
        }
    }
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            chat_path: default_chat_path(),
        }
    }
}
