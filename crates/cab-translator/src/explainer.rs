use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::http::HttpClient;
use crate::{ExplainRequest, Explainer};

/// Explanations from a Responses-style chat proxy (`POST {base}/api/chat`)
#[derive(Clone)]
pub struct ChatExplainer {
    http: HttpClient,
    model: String,
    chat_path: String,
}

impl ChatExplainer {
    pub fn new(http: HttpClient, model: String, chat_path: String) -> Self {
        Self {
            http,
            model,
            chat_path,
        }
    }
}

#[async_trait]
impl Explainer for ChatExplainer {
    async fn explain(&self, request: &ExplainRequest) -> Result<Vec<String>, ServiceError> {
        let url = format!(
            "{}{}",
            request.api_base_url.trim_end_matches('/'),
            self.chat_path
        );
        let body = ChatBody {
            model: &self.model,
            input: &request.prompt,
        };

        let reply: ChatReply = self.http.post_json(&url, &[], &[], &body).await?;

        Ok(reply.segments())
    }
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ChatReply {
    fn segments(self) -> Vec<String> {
        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect()
    }
}
