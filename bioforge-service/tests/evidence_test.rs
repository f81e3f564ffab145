//! Router-level tests for `POST /search-evidence`.
//! Run with: cargo test -p bioforge-service --test evidence_test

mod common;

use axum::http::StatusCode;
use bioforge_service::services::providers::{
    MockFailure, MockReply, MockSearchProvider, SearchDepth,
};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn returns_provider_results_verbatim() {
    let results = vec![
        json!({"title": "ACE inhibitors", "url": "https://example.org/a", "score": 0.91}),
        json!({"title": "ACE inhibitors", "url": "https://example.org/a", "score": 0.91}),
        json!({"title": "Beta blockers", "url": "https://example.org/b", "raw_content": null}),
    ];
    let app = TestApp::new(MockReply::Echo, MockSearchProvider::new(results.clone()));

    let (status, body) = app
        .post_json("/search-evidence", json!({"effect": "pain relief"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    // Duplicates and nulls pass through untouched.
    assert_eq!(body, json!({"evidence": results}));

    let queries = app.search.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0].query,
        "pain relief synthetic molecule biomedical research"
    );
    assert_eq!(queries[0].depth, SearchDepth::Advanced);
    assert_eq!(app.generation.call_count(), 0);
}

#[tokio::test]
async fn empty_results_are_success() {
    let app = TestApp::new(MockReply::Echo, MockSearchProvider::new(vec![]));

    let (status, body) = app
        .post_json("/search-evidence", json!({"effect": "pain relief"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"evidence": []}));
}

#[tokio::test]
async fn blank_effect_is_400_without_outbound_call() {
    let app = TestApp::new(MockReply::Echo, MockSearchProvider::new(vec![]));

    for body in [json!({}), json!({"effect": ""}), json!({"effect": "  "})] {
        let (status, response) = app.post_json("/search-evidence", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "No effect provided");
    }

    assert!(app.search.queries().is_empty());
}

#[tokio::test]
async fn provider_failure_is_500() {
    let app = TestApp::new(
        MockReply::Echo,
        MockSearchProvider::failing(MockFailure::Network("connection reset".to_string())),
    );

    let (status, body) = app
        .post_json("/search-evidence", json!({"effect": "pain relief"}))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn provider_throttling_is_503() {
    let app = TestApp::new(
        MockReply::Echo,
        MockSearchProvider::failing(MockFailure::RateLimited),
    );

    let (status, _) = app
        .post_json("/search-evidence", json!({"effect": "pain relief"}))
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
