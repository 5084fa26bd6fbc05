use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::explainer::ExplainerConfig;
use self::translator::TranslatorConfig;

pub mod dictionary;
pub mod explainer;
pub mod options;
pub mod translator;

pub use options::Options;

/// Process configuration, read from the environment at startup.
/// User-facing settings live in [`Options`] inside the store instead.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub dictionary: DictionaryConfig,
    pub explainer: ExplainerConfig,

    /// Per-call HTTP timeout
    pub timeout_seconds: u64,
    /// JSON store file, `None` means the platform data dir
    pub store_path: Option<String>,
    /// Capacity of the request/reply channels in the app loop
    pub channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30); // 30 seconds default

        let channel_capacity = env::var("CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        let store_path = env::var("CAB_STORE_PATH").ok().filter(|p| !p.is_empty());

        Config {
            translator: TranslatorConfig::new(),
            dictionary: DictionaryConfig::new(),
            explainer: ExplainerConfig::new(),

            timeout_seconds,
            store_path,
            channel_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            dictionary: DictionaryConfig::default(),
            explainer: ExplainerConfig::default(),
            timeout_seconds: 30,
            store_path: None,
            channel_capacity: 64,
        }
    }
}
