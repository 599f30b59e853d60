//! OpenAI Chat Completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::types::Message;

use super::http::{bearer_headers, build_client, status_to_error};
use super::{CompletionRequest, ModelClient};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from config. Fails without an API key.
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AgentError::Authentication("Missing OPENAI_API_KEY".into()))?;
        Ok(Self::new(build_client(config)?, api_key, config.base_url.clone()))
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, AgentError> {
        let body = ChatRequest {
            model: &request.model,
            temperature: request.temperature,
            messages: &request.messages,
        };
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = request.model.as_str(),
            messages = request.messages.len(),
            "OpenAI chat completion"
        );

        let resp = self
            .http
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: ChatResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::api(status, "No choices in OpenAI response"))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

// OpenAI API wire types (internal)

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_api_key() {
        let err = OpenAiClient::from_config(&AgentConfig::default()).err().unwrap();
        assert!(matches!(err, AgentError::Authentication(_)));
    }

    #[test]
    fn request_body_sends_history_in_order() {
        let messages = vec![Message::system("sys"), Message::user("q")];
        let body = ChatRequest {
            model: "gpt-4o-mini",
            temperature: 0.0,
            messages: &messages,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "temperature": 0.0,
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "q" },
                ],
            })
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_dropped() {
        let client = OpenAiClient::new(reqwest::Client::new(), "k", "http://localhost:9/v1/");
        assert_eq!(client.base_url, "http://localhost:9/v1");
    }
}
