//! Common test utilities for integration tests
//!
//! This module provides a router wired to a mock Generative Language API.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bmi_insights_backend::{
    config::{AiConfig, AppConfig, ServerConfig},
    routes,
    state::AppState,
};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub llm: MockServer,
}

impl TestApp {
    /// Create a new test application backed by a mock LLM server
    pub async fn new() -> Self {
        let llm = MockServer::start().await;
        let config = test_config(&llm.uri(), Some(TEST_API_KEY));
        let state = AppState::new(config).unwrap();
        let app = routes::create_router(state);

        Self { app, llm }
    }

    /// Create a test application with no LLM API key
    pub async fn without_api_key() -> Self {
        let llm = MockServer::start().await;
        let config = test_config(&llm.uri(), None);
        let state = AppState::new(config).unwrap();
        let app = routes::create_router(state);

        Self { app, llm }
    }

    /// Create a test application with explicit server and LLM timeouts
    pub async fn with_timeouts(request_timeout_secs: u64, ai_timeout_secs: u64) -> Self {
        let llm = MockServer::start().await;
        let mut config = test_config(&llm.uri(), Some(TEST_API_KEY));
        config.server.request_timeout_secs = request_timeout_secs;
        config.ai.timeout_secs = ai_timeout_secs;
        let state = AppState::new(config).unwrap();
        let app = routes::create_router(state);

        Self { app, llm }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// POST and parse the JSON response body
    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let (status, text) = self.post(path, &body.to_string()).await;
        let value = serde_json::from_str(&text).unwrap_or(Value::Null);
        (status, value)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

/// Wrap advice JSON as a generateContent response
pub fn gemini_reply(advice: &Value) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": advice.to_string()}]
            },
            "finishReason": "STOP"
        }]
    })
}

pub fn test_config(base_url: &str, api_key: Option<&str>) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 10,
            body_limit_bytes: 16 * 1024,
        },
        ai: AiConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(|key| SecretString::new(key.to_string())),
            timeout_secs: 5,
            ..AiConfig::default()
        },
    }
}
