#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_lib::config::Config;
use api_lib::fixtures::SeedDocument;
use api_lib::web::{self, state::AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use edustream_core::ports::{CompletionRequest, CompletionService, PortError, PortResult};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// A completion service that replays canned replies, then fails.
pub struct StubCompletions {
    replies: Mutex<VecDeque<PortResult<String>>>,
    pub prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl StubCompletions {
    pub fn new(replies: Vec<PortResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            delay: None,
        })
    }

    /// Like [`StubCompletions::new`], but every call takes `delay` to answer.
    pub fn slow(replies: Vec<PortResult<String>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            delay: Some(delay),
        })
    }

    /// Every call fails as if the service were unreachable.
    pub fn offline() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for StubCompletions {
    async fn complete(&self, request: CompletionRequest) -> PortResult<String> {
        self.prompts.lock().unwrap().push(request.prompt);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PortError::Transport("connection refused".to_string())))
    }
}

/// Default configuration with no API key and nothing read from the environment.
pub fn test_config() -> Config {
    Config::from_lookup(|_| None).expect("default config is valid")
}

/// Builds the API router over the built-in fixtures.
pub fn build_test_app(completions: Arc<dyn CompletionService>) -> Router {
    let state = AppState::new(Arc::new(test_config()), completions, SeedDocument::builtin());
    web::router(Arc::new(state))
}

/// Sends one request and returns the status with the body parsed as JSON.
/// Plain-text bodies come back as a JSON string.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send(app, Method::POST, uri, body).await
}
