//! Shared helpers for bioforge-service integration tests.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bioforge_service::config::BioforgeConfig;
use bioforge_service::models::model::OPENROUTER_MODELS;
use bioforge_service::services::providers::{
    MockGenerationProvider, MockReply, MockSearchProvider,
};
use bioforge_service::services::Relay;
use bioforge_service::startup::{build_router, AppState};
use serde_json::Value;
use service_core::config::Config;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tower::ServiceExt;

/// Config with mock backends bound to a random localhost port.
pub fn test_config(extra: &[(&str, &str)]) -> BioforgeConfig {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("GENERATION_PROVIDER".to_string(), "mock".to_string()),
        ("SEARCH_PROVIDER".to_string(), "mock".to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }

    let common = Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
    };
    BioforgeConfig::from_source(common, |key| vars.get(key).cloned())
        .expect("Failed to build test config")
}

pub struct TestApp {
    pub router: Router,
    pub generation: Arc<MockGenerationProvider>,
    pub search: Arc<MockSearchProvider>,
}

impl TestApp {
    /// Router backed by inspectable mocks. Generation uses the OpenRouter
    /// model table so resolved ids are the real ones.
    pub fn new(reply: MockReply, search: MockSearchProvider) -> Self {
        Self::with_config(test_config(&[]), reply, search)
    }

    pub fn with_config(config: BioforgeConfig, reply: MockReply, search: MockSearchProvider) -> Self {
        let generation = Arc::new(MockGenerationProvider::with_models(reply, OPENROUTER_MODELS));
        let search = Arc::new(search);
        let relay = Relay::new(generation.clone(), search.clone());
        let router = build_router(AppState::new(config, relay));

        Self {
            router,
            generation,
            search,
        }
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(path, body.to_string()).await
    }

    pub async fn post_raw(&self, path: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}
