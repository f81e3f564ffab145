//! Mock provider implementations for testing and credential-free local runs.

use super::{
    GenerationParams, GenerationProvider, ProviderError, SearchProvider, SearchQuery,
};
use crate::models::model::{ModelMap, MOCK_MODELS};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

/// A scripted provider failure.
#[derive(Debug, Clone)]
pub enum MockFailure {
    RateLimited,
    Api { status: u16, body: String },
    Network(String),
}

impl MockFailure {
    fn to_error(&self) -> ProviderError {
        match self {
            MockFailure::RateLimited => ProviderError::RateLimited,
            MockFailure::Api { status, body } => ProviderError::ApiError {
                status: *status,
                body: body.clone(),
            },
            MockFailure::Network(msg) => ProviderError::NetworkError(msg.clone()),
        }
    }
}

/// What the mock generation provider answers.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// `Mock response for: <prompt>`
    Echo,
    /// Fixed content for the first choice.
    Text(String),
    /// A well-formed response with zero choices.
    NoChoices,
    Fail(MockFailure),
}

/// One recorded `complete` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCompletion {
    pub prompt: String,
    pub model_id: String,
    pub temperature: f64,
}

/// Mock generation provider that records every call.
pub struct MockGenerationProvider {
    reply: MockReply,
    models: ModelMap,
    calls: Mutex<Vec<RecordedCompletion>>,
}

impl MockGenerationProvider {
    pub fn new(reply: MockReply) -> Self {
        Self::with_models(reply, MOCK_MODELS)
    }

    /// Uses a real provider's model table, handy for asserting resolved ids.
    pub fn with_models(reply: MockReply, models: ModelMap) -> Self {
        Self {
            reply,
            models,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCompletion> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn models(&self) -> &ModelMap {
        &self.models
    }

    async fn complete(
        &self,
        prompt: &str,
        model_id: &str,
        params: &GenerationParams,
    ) -> Result<Option<String>, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCompletion {
                prompt: prompt.to_string(),
                model_id: model_id.to_string(),
                temperature: params.temperature,
            });

        match &self.reply {
            MockReply::Echo => Ok(Some(format!("Mock response for: {}", prompt))),
            MockReply::Text(text) => Ok(Some(text.clone())),
            MockReply::NoChoices => Ok(None),
            MockReply::Fail(failure) => Err(failure.to_error()),
        }
    }
}

/// Mock search provider that records every query.
pub struct MockSearchProvider {
    reply: Result<Vec<Value>, MockFailure>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockSearchProvider {
    pub fn new(results: Vec<Value>) -> Self {
        Self {
            reply: Ok(results),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self {
            reply: Err(failure),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A single canned result, used when `SEARCH_PROVIDER=mock`.
    pub fn canned() -> Self {
        Self::new(vec![json!({
            "title": "Mock evidence",
            "url": "https://example.org/mock-evidence",
            "content": "Placeholder search result from the mock search provider.",
            "score": 1.0
        })])
    }

    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>, ProviderError> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());

        match &self.reply {
            Ok(results) => Ok(results.clone()),
            Err(failure) => Err(failure.to_error()),
        }
    }
}
