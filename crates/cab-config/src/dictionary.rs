use std::env;

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://api.cognitive.microsofttranslator.com".to_string()
}

/// Detection, dictionary lookup and example sentences (Microsoft Translator)
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub subscription_key: String,
    /// Azure region of the subscription, sent along with the key
    #[serde(default)]
    pub region: Option<String>,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        Self {
            endpoint: env::var("TRANSLATOR_ENDPOINT").unwrap_or_else(|_| default_endpoint()),
            subscription_key: env::var("TRANSLATOR_KEY").unwrap_or_default(),
            region: env::var("TRANSLATOR_REGION").ok().filter(|r| !r.is_empty()),
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            subscription_key: String::new(),
            region: None,
        }
    }
}
