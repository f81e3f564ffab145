//! Upstream provider abstractions and implementations.
//!
//! The relay only talks to these traits, so swapping OpenRouter for
//! Together AI or Hugging Face (or a mock) is a configuration change.

pub mod chat_completions;
pub mod mock;
pub mod tavily;

use crate::models::ModelMap;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use chat_completions::{ChatCompletionsConfig, ChatCompletionsProvider};
pub use mock::{
    MockFailure, MockGenerationProvider, MockReply, MockSearchProvider, RecordedCompletion,
};
pub use tavily::{TavilyConfig, TavilyProvider};

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError { .. } => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::NetworkError(_) => "network",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::NetworkError(format!("request timed out: {}", err))
        } else if err.is_decode() {
            ProviderError::InvalidResponse(err.to_string())
        } else {
            ProviderError::NetworkError(err.to_string())
        }
    }
}

/// Maps a non-success HTTP response to a [`ProviderError`], keeping the
/// provider's error body for diagnostics.
pub(crate) async fn error_for_status(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return ProviderError::RateLimited;
    }

    let body = response.text().await.unwrap_or_default();
    ProviderError::ApiError {
        status: status.as_u16(),
        body,
    }
}

/// Sampling parameters for a completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { temperature: 0.7 }
    }
}

/// Text-generation capability (chat-completion style).
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short provider name for logs, metrics and error messages.
    fn name(&self) -> &'static str;

    /// Alias to model-id table for this provider.
    fn models(&self) -> &ModelMap;

    /// Sends `prompt` as a single user message to `model_id`.
    ///
    /// Returns the first choice's raw content, `Some("")` when that choice
    /// has no content, or `None` when the provider returned no choices.
    async fn complete(
        &self,
        prompt: &str,
        model_id: &str,
        params: &GenerationParams,
    ) -> Result<Option<String>, ProviderError>;
}

/// How much effort the search provider should spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub depth: SearchDepth,
}

/// Web-search capability.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs `query` and returns the provider's result records untouched.
    /// A response without a `results` field is an empty list.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>, ProviderError>;
}
