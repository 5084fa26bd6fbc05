use async_trait::async_trait;
use cab_types::LangTag;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::http::HttpClient;
use crate::{ProviderMetadata, Translation, Translator};

#[derive(Clone)]
pub struct DeepLTranslator {
    http: HttpClient,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(http: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: Option<&LangTag>,
        to: &LangTag,
    ) -> Result<Translation, ServiceError> {
        if self.api_key.is_empty() {
            return Err(ServiceError::missing_key("DeepL"));
        }

        let body = TranslateBody {
            text: [text],
            target_lang: to.as_str(),
            source_lang: from.map(LangTag::as_str),
        };
        let headers = [("Authorization", format!("DeepL-Auth-Key {}", self.api_key))];

        let reply: TranslateReply = self
            .http
            .post_json(&self.api_url, &headers, &[], &body)
            .await?;

        let first = reply
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Malformed("No translation in response".to_string()))?;

        let detected = first
            .detected_source_language
            .as_deref()
            .and_then(|code| LangTag::parse(code).ok());

        Ok(Translation {
            text: first.text,
            from: from.cloned().or(detected),
            to: to.clone(),
            provider: "deepl".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
        }
    }
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    text: [&'a str; 1],
    target_lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateReply {
    #[serde(default)]
    translations: Vec<TranslatedItem>,
}

#[derive(Deserialize)]
struct TranslatedItem {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}
