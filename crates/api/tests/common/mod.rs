#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use bubble_api::router::build_app_router;
use bubble_api::state::AppState;
use bubble_core::config::AppConfig;
use bubble_queue::{NotificationQueue, QueueError};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Config used by the integration tests: two commands, custom list name.
pub const TEST_CONFIG: &str = r#"
redis:
  addr: "localhost:6379"
  list_name: "poppit:test"

server:
  port: "0"
  request_timeout_secs: 5
  shutdown_timeout_secs: 1

commands:
  - name: "Deploy"
    repo: "org/app"
    branch: "main"
    type: "deploy"
    dir: "/srv"
    commands:
      - "make deploy"
  - name: "Run Tests"
    repo: "org/app"
    branch: "refs/heads/develop"
    type: "manual-trigger"
    dir: "/srv/app"
    commands:
      - "cargo test"
      - "cargo clippy"
"#;

pub fn test_config() -> AppConfig {
    AppConfig::from_yaml_str(TEST_CONFIG).unwrap()
}

/// In-memory queue that records every append.
#[derive(Default)]
pub struct RecordingQueue {
    pushes: Mutex<Vec<(String, String)>>,
    fail: bool,
    closed: AtomicBool,
}

impl RecordingQueue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A queue whose every command fails like an unreachable Redis.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    /// `(list, payload)` pairs in push order.
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn unavailable() -> QueueError {
        QueueError::Command(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection refused",
        )))
    }
}

#[async_trait]
impl NotificationQueue for RecordingQueue {
    async fn push(&self, list: &str, payload: &str) -> Result<(), QueueError> {
        if self.fail {
            return Err(Self::unavailable());
        }
        self.pushes
            .lock()
            .unwrap()
            .push((list.to_string(), payload.to_string()));
        Ok(())
    }

    async fn ping(&self) -> Result<(), QueueError> {
        if self.fail {
            return Err(Self::unavailable());
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), QueueError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub fn test_state(queue: Arc<RecordingQueue>) -> AppState {
    AppState::new(Arc::new(test_config()), queue)
}

/// Build the full application router (same middleware stack as
/// production) around the given queue.
pub fn build_test_app(queue: Arc<RecordingQueue>) -> Router {
    let state = test_state(queue);
    let server = state.config.server.clone();
    build_app_router(state, &server)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
