use async_trait::async_trait;
use cab_types::LangTag;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::http::HttpClient;
use crate::{Detector, Example, ExampleQuery, Exemplifier, Lexicon, Sense};

const API_VERSION: &str = "3.0";

/// Microsoft Translator v3: language detection and the dictionary endpoints
#[derive(Clone)]
pub struct MicrosoftDictionary {
    http: HttpClient,
    endpoint: String,
    subscription_key: String,
    region: Option<String>,
}

impl MicrosoftDictionary {
    pub fn new(
        http: HttpClient,
        endpoint: String,
        subscription_key: String,
        region: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint,
            subscription_key,
            region,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }

    fn headers(&self) -> Result<Vec<(&'static str, String)>, ServiceError> {
        if self.subscription_key.is_empty() {
            return Err(ServiceError::missing_key("Microsoft Translator"));
        }

        let mut headers = vec![
            ("Ocp-Apim-Subscription-Key", self.subscription_key.clone()),
            ("X-ClientTraceId", Uuid::new_v4().to_string()),
        ];
        if let Some(region) = &self.region {
            headers.push(("Ocp-Apim-Subscription-Region", region.clone()));
        }

        Ok(headers)
    }
}

#[async_trait]
impl Detector for MicrosoftDictionary {
    async fn detect(&self, text: &str) -> Result<LangTag, ServiceError> {
        let body = [TextItem { text }];
        let reply: Vec<DetectItem> = self
            .http
            .post_json(
                &self.url("detect"),
                &self.headers()?,
                &[("api-version", API_VERSION)],
                &body,
            )
            .await?;

        let language = reply
            .into_iter()
            .next()
            .map(|item| item.language)
            .ok_or_else(|| ServiceError::Malformed("No detection result".to_string()))?;

        LangTag::parse(&language)
            .map_err(|e| ServiceError::Malformed(format!("Detected language: {e}")))
    }
}

#[async_trait]
impl Lexicon for MicrosoftDictionary {
    async fn lookup(
        &self,
        word: &str,
        from: &LangTag,
        to: &LangTag,
    ) -> Result<Vec<Sense>, ServiceError> {
        let from = from.to_lowercase();
        let to = to.to_lowercase();
        let body = [TextItem { text: word }];

        let reply: Vec<LookupItem> = self
            .http
            .post_json(
                &self.url("dictionary/lookup"),
                &self.headers()?,
                &[("api-version", API_VERSION), ("from", from.as_str()), ("to", to.as_str())],
                &body,
            )
            .await?;

        let item = reply
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Malformed("Empty lookup response".to_string()))?;

        Ok(item.translations.into_iter().map(Sense::from).collect())
    }
}

#[async_trait]
impl Exemplifier for MicrosoftDictionary {
    async fn examples(&self, query: &ExampleQuery) -> Result<Vec<Example>, ServiceError> {
        // The examples endpoint is addressed from the sense's side
        let from = query.to.to_lowercase();
        let to = query.from.to_lowercase();
        let body = [PairItem {
            text: &query.text,
            translation: &query.translation,
        }];

        let reply: Vec<ExamplesItem> = self
            .http
            .post_json(
                &self.url("dictionary/examples"),
                &self.headers()?,
                &[("api-version", API_VERSION), ("from", from.as_str()), ("to", to.as_str())],
                &body,
            )
            .await?;

        let item = reply
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Malformed("Empty examples response".to_string()))?;

        Ok(item
            .examples
            .into_iter()
            .map(|ex| Example {
                source_sentence: format!("{}{}{}", ex.target_prefix, ex.target_term, ex.target_suffix),
                target_sentence: format!("{}{}{}", ex.source_prefix, ex.source_term, ex.source_suffix),
            })
            .collect())
    }
}

#[derive(Serialize)]
struct TextItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Serialize)]
struct PairItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
    #[serde(rename = "Translation")]
    translation: &'a str,
}

#[derive(Deserialize)]
struct DetectItem {
    language: String,
}

#[derive(Deserialize)]
struct LookupItem {
    translations: Vec<LookupTranslation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupTranslation {
    normalized_target: String,
    #[serde(default)]
    pos_tag: Option<String>,
    #[serde(default)]
    back_translations: Vec<BackTranslation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackTranslation {
    display_text: String,
}

impl From<LookupTranslation> for Sense {
    fn from(t: LookupTranslation) -> Self {
        Sense {
            text: t.normalized_target,
            part_of_speech: t.pos_tag.filter(|pos| !pos.is_empty()),
            back_translations: t
                .back_translations
                .into_iter()
                .map(|b| b.display_text)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct ExamplesItem {
    #[serde(default)]
    examples: Vec<RawExample>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExample {
    #[serde(default)]
    source_prefix: String,
    source_term: String,
    #[serde(default)]
    source_suffix: String,
    #[serde(default)]
    target_prefix: String,
    target_term: String,
    #[serde(default)]
    target_suffix: String,
}
