use std::sync::Arc;
use std::time::Duration;

use cab_config::Config;
use cab_core::{Dispatcher, Engine, KeyValueStore, LocalState, Services};
use cab_translator::{ChatExplainer, DeepLTranslator, HttpClient, MicrosoftDictionary};

pub struct AppState {
    pub config: Config,
    pub local: Arc<LocalState>,
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Wire the remote adapters from `config`
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let http = HttpClient::new(Duration::from_secs(config.timeout_seconds))?;

        if config.dictionary.subscription_key.is_empty() {
            tracing::warn!("TRANSLATOR_KEY not set, definitions will fail");
        }
        if config.translator.api_key.is_empty() {
            tracing::warn!("DEEPL_API_KEY not set, translations will fail");
        }

        let dictionary = Arc::new(MicrosoftDictionary::new(
            http.clone(),
            config.dictionary.endpoint.clone(),
            config.dictionary.subscription_key.clone(),
            config.dictionary.region.clone(),
        ));

        let services = Services {
            detector: dictionary.clone(),
            lexicon: dictionary.clone(),
            exemplifier: dictionary,
            translator: Arc::new(DeepLTranslator::new(
                http.clone(),
                config.translator.api_key.clone(),
                config.translator.api_url.clone(),
            )),
            explainer: Arc::new(ChatExplainer::new(
                http,
                config.explainer.model.clone(),
                config.explainer.chat_path.clone(),
            )),
        };

        Ok(Self::with_services(config, services, store))
    }

    pub fn with_services(config: Config, services: Services, store: Arc<dyn KeyValueStore>) -> Self {
        let local = Arc::new(LocalState::new(store));
        let dispatcher = Dispatcher::new(Engine::new(services, local.clone()), local.clone());

        Self {
            config,
            local,
            dispatcher,
        }
    }
}
