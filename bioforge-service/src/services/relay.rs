//! The request relay: validate, build the outbound payload, call one
//! provider, unwrap the answer.

use super::metrics;
use super::providers::{
    GenerationParams, GenerationProvider, ProviderError, SearchDepth, SearchProvider, SearchQuery,
};
use crate::error::RelayError;
use crate::models::{EvidenceRequest, GenerationRequest};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

/// Appended to the effect to steer web search towards research sources.
pub const EVIDENCE_QUERY_SUFFIX: &str = "synthetic molecule biomedical research";

/// Builds the evidence search query for an already-trimmed effect.
pub fn evidence_query(effect: &str) -> String {
    format!("{} {}", effect, EVIDENCE_QUERY_SUFFIX)
}

/// Stateless relay over a generation and a search provider.
#[derive(Clone)]
pub struct Relay {
    generation: Arc<dyn GenerationProvider>,
    search: Arc<dyn SearchProvider>,
    params: GenerationParams,
}

impl Relay {
    pub fn new(generation: Arc<dyn GenerationProvider>, search: Arc<dyn SearchProvider>) -> Self {
        Self {
            generation,
            search,
            params: GenerationParams::default(),
        }
    }

    /// Renders the prompt for `request.mode` and returns the first
    /// completion, trimmed.
    #[tracing::instrument(skip(self, request), fields(mode = request.mode.key(), model = request.model.key()))]
    pub async fn generate(&self, request: GenerationRequest) -> Result<String, RelayError> {
        let result = self.try_generate(request).await;
        metrics::record_relay_request("generate", outcome(&result));
        result
    }

    async fn try_generate(&self, request: GenerationRequest) -> Result<String, RelayError> {
        request.validate()?;

        let model_id = self.generation.models().resolve(request.model);
        let prompt = request.mode.render(&request.effect);
        let provider = self.generation.name();

        let start = Instant::now();
        let completion = self
            .generation
            .complete(&prompt, model_id, &self.params)
            .await;
        metrics::record_provider_latency(provider, "generate", start.elapsed().as_secs_f64());

        let content = completion.map_err(|e| upstream_error(provider, e))?;

        match content.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                tracing::info!(provider, model = %model_id, "Generation completed");
                Ok(text.to_string())
            }
            _ => {
                tracing::warn!(
                    provider,
                    model = %model_id,
                    has_choice = content.is_some(),
                    "Provider returned no usable content"
                );
                Err(RelayError::UpstreamEmpty)
            }
        }
    }

    /// Searches for supporting evidence and returns the provider's result
    /// records unchanged.
    #[tracing::instrument(skip(self, request))]
    pub async fn search_evidence(&self, request: EvidenceRequest) -> Result<Vec<Value>, RelayError> {
        let result = self.try_search_evidence(request).await;
        metrics::record_relay_request("search_evidence", outcome(&result));
        result
    }

    async fn try_search_evidence(&self, request: EvidenceRequest) -> Result<Vec<Value>, RelayError> {
        request.validate()?;

        let query = SearchQuery {
            query: evidence_query(&request.effect),
            depth: SearchDepth::Advanced,
        };
        let provider = self.search.name();

        let start = Instant::now();
        let results = self.search.search(&query).await;
        metrics::record_provider_latency(provider, "search", start.elapsed().as_secs_f64());

        let results = results.map_err(|e| upstream_error(provider, e))?;
        tracing::info!(provider, count = results.len(), "Evidence search completed");
        Ok(results)
    }
}

fn outcome<T>(result: &Result<T, RelayError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    }
}

fn upstream_error(provider: &'static str, err: ProviderError) -> RelayError {
    metrics::record_provider_error(provider, err.kind());
    match err {
        ProviderError::RateLimited => RelayError::RateLimited { provider },
        other => RelayError::Upstream {
            provider,
            message: other.to_string(),
        },
    }
}
