//! OpenAI-compatible chat completions provider.
//!
//! OpenRouter, Together AI and the Hugging Face router all accept the same
//! `POST {base}/chat/completions` shape; only the base URL, model table and
//! OpenRouter's attribution headers differ.

use super::{error_for_status, GenerationParams, GenerationProvider, ProviderError};
use crate::config::GenerationBackend;
use crate::models::ModelMap;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Chat completions provider configuration.
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    pub backend: GenerationBackend,
    pub api_key: Secret<String>,
    pub base_url: String,
    pub referer: String,
    pub title: String,
}

pub struct ChatCompletionsProvider {
    config: ChatCompletionsConfig,
    client: Client,
}

impl ChatCompletionsProvider {
    /// `client` carries the upstream timeout and is shared with other
    /// providers.
    pub fn new(config: ChatCompletionsConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl GenerationProvider for ChatCompletionsProvider {
    fn name(&self) -> &'static str {
        self.config.backend.name()
    }

    fn models(&self) -> &ModelMap {
        self.config.backend.models()
    }

    async fn complete(
        &self,
        prompt: &str,
        model_id: &str,
        params: &GenerationParams,
    ) -> Result<Option<String>, ProviderError> {
        if self.config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(format!(
                "{} API key not configured",
                self.name()
            )));
        }

        let request = ChatCompletionRequest {
            model: model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
        };

        tracing::debug!(
            provider = self.name(),
            model = %model_id,
            prompt_len = prompt.len(),
            "Sending chat completion request"
        );

        let mut builder = self
            .client
            .post(self.api_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request);

        if self.config.backend == GenerationBackend::OpenRouter {
            builder = builder
                .header("HTTP-Referer", &self.config.referer)
                .header("X-Title", &self.config.title);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let body: ChatCompletionResponse = response.json().await?;

        Ok(body
            .choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|choice| choice.message.and_then(|m| m.content).unwrap_or_default()))
    }
}

// ============================================================================
// Chat Completions Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_as_single_user_message() {
        let request = ChatCompletionRequest {
            model: "meta-llama/llama-4-maverick:free",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.7,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "meta-llama/llama-4-maverick:free");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["temperature"], 0.7);
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let body: ChatCompletionResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(body.choices.is_none());

        let body: ChatCompletionResponse = serde_json::from_str(r#"{"choices":null}"#).unwrap();
        assert!(body.choices.unwrap_or_default().is_empty());

        let body: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        let choices = body.choices.unwrap();
        assert!(choices[0].message.as_ref().unwrap().content.is_none());
    }
}
