//! In-process stand-in for the Ollama HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::{GenerateRequest, ModelTag, TagsResponse};
use crate::config::OllamaConfig;

struct MockState {
    live: AtomicBool,
    models: Mutex<Vec<String>>,
    tags_body: Mutex<Option<String>>,
    generate_status: Mutex<StatusCode>,
    generate_body: Mutex<String>,
    generate_delay: Mutex<Duration>,
    generate_hits: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

/// Mock server bound to an ephemeral localhost port.
pub(crate) struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockServer {
    /// Start a live server that lists `models` as installed.
    pub(crate) async fn start<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = Arc::new(MockState {
            live: AtomicBool::new(true),
            models: Mutex::new(models.into_iter().map(Into::into).collect()),
            tags_body: Mutex::new(None),
            generate_status: Mutex::new(StatusCode::OK),
            generate_body: Mutex::new(
                serde_json::json!({
                    "model": "llama2",
                    "response": "The torchlight flickers.",
                    "done": true
                })
                .to_string(),
            ),
            generate_delay: Mutex::new(Duration::ZERO),
            generate_hits: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route("/api/tags", get(tags))
            .route("/api/generate", post(generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Config pointing at this server, with `true` as the server binary and
    /// short launch polling.
    pub(crate) fn config(&self) -> OllamaConfig {
        test_config(format!("http://{}", self.addr))
    }

    /// When not live, `/api/tags` answers 503.
    pub(crate) fn set_live(&self, live: bool) {
        self.state.live.store(live, Ordering::SeqCst);
    }

    pub(crate) fn set_tags_body(&self, body: &str) {
        *self.state.tags_body.lock().unwrap() = Some(body.to_string());
    }

    pub(crate) fn set_generate_json(&self, body: serde_json::Value) {
        self.set_generate_raw(StatusCode::OK, &body.to_string());
    }

    pub(crate) fn set_generate_raw(&self, status: StatusCode, body: &str) {
        *self.state.generate_status.lock().unwrap() = status;
        *self.state.generate_body.lock().unwrap() = body.to_string();
    }

    /// Hold every generate answer back by `delay`.
    pub(crate) fn set_generate_delay(&self, delay: Duration) {
        *self.state.generate_delay.lock().unwrap() = delay;
    }

    pub(crate) fn generate_hits(&self) -> usize {
        self.state.generate_hits.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<GenerateRequest> {
        self.state.last_request.lock().unwrap().clone()
    }
}

/// Config with fast launch polling and `true` standing in for the server binary.
pub(crate) fn test_config(base_url: String) -> OllamaConfig {
    OllamaConfig::builder()
        .base_url(base_url)
        .binary(PathBuf::from("true"))
        .probe_timeout(Duration::from_millis(500))
        .generate_timeout(Duration::from_secs(5))
        .launch_attempts(3)
        .launch_interval(Duration::from_millis(20))
        .build()
}

/// URL of a localhost port nothing is listening on.
pub(crate) fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn tags(State(state): State<Arc<MockState>>) -> Response {
    if !state.live.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    if let Some(body) = state.tags_body.lock().unwrap().clone() {
        return body.into_response();
    }

    let models = state
        .models
        .lock()
        .unwrap()
        .iter()
        .map(|name| ModelTag { name: name.clone() })
        .collect();
    Json(TagsResponse { models }).into_response()
}

async fn generate(
    State(state): State<Arc<MockState>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    state.generate_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_request.lock().unwrap() = Some(request);

    let delay = *state.generate_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let status = *state.generate_status.lock().unwrap();
    let body = state.generate_body.lock().unwrap().clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
