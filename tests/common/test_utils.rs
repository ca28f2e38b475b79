use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use blueprint_relay::{
    config::{Config, UpstreamConfig},
    llm::LlmClient,
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-api-key";

/// Upstream settings with a credential present.
pub fn create_test_upstream() -> UpstreamConfig {
    UpstreamConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        ..UpstreamConfig::default()
    }
}

/// Build the relay router around the given client and upstream settings.
pub fn create_test_app_with(client: Arc<dyn LlmClient>, upstream: UpstreamConfig) -> Router {
    let config = Config::default();
    server::router(AppState {
        client,
        upstream: Arc::new(upstream),
        max_prompt_chars: config.server.max_prompt_chars,
        max_body_bytes: config.server.max_body_bytes,
    })
}

pub fn create_test_app(client: Arc<dyn LlmClient>) -> Router {
    create_test_app_with(client, create_test_upstream())
}

pub fn post_json(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn post_prompt(prompt: &str) -> Request<Body> {
    post_json(serde_json::json!({ "prompt": prompt }).to_string())
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Assert the CORS headers every relay response must carry.
pub fn assert_cors_headers<B>(response: &Response<B>) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}
