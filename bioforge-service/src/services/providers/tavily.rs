//! Tavily web-search provider.

use super::{error_for_status, ProviderError, SearchDepth, SearchProvider, SearchQuery};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct TavilyConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
}

pub struct TavilyProvider {
    config: TavilyConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    query: &'a str,
    search_depth: SearchDepth,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

impl TavilyProvider {
    pub fn new(config: TavilyConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &'static str {
        "tavily"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>, ProviderError> {
        if self.config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Tavily API key not configured".to_string(),
            ));
        }

        let request = TavilySearchRequest {
            query: &query.query,
            search_depth: query.depth,
        };

        tracing::debug!(query_len = query.query.len(), depth = ?query.depth, "Sending Tavily search");

        let response = self
            .client
            .post(format!("{}/search", self.config.base_url))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let body: TavilySearchResponse = response.json().await?;
        Ok(body.results.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_snake_case_depth() {
        let value = serde_json::to_value(TavilySearchRequest {
            query: "pain relief synthetic molecule biomedical research",
            search_depth: SearchDepth::Advanced,
        })
        .unwrap();
        assert_eq!(value["search_depth"], "advanced");
        assert_eq!(
            value["query"],
            "pain relief synthetic molecule biomedical research"
        );
    }

    #[test]
    fn missing_results_is_empty() {
        let body: TavilySearchResponse = serde_json::from_str(r#"{"answer":null}"#).unwrap();
        assert!(body.results.unwrap_or_default().is_empty());
    }
}
