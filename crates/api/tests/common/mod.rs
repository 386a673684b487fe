#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use quill_api::config::{DatabaseConfig, OpenAiConfig, Secret, ServerConfig};
use quill_api::render::{HtmlRenderer, Page, PageRenderer, RenderError};
use quill_api::router::build_app_router;
use quill_api::state::AppState;
use quill_db::{ArticleStore, MemoryArticleStore};
use quill_writer::{ArticleWriter, GenerationError};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5000".to_string()],
        request_timeout_secs: 30,
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: Secret::new("test"),
            name: "blog_generator_test".to_string(),
            max_connections: 1,
        },
        openai: OpenAiConfig {
            api_key: Secret::new("sk-test"),
            api_url: "http://127.0.0.1:9/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Writer returning canned text, or failing like an unreachable upstream.
pub enum StubWriter {
    Text(&'static str),
    Failing,
}

#[async_trait]
impl ArticleWriter for StubWriter {
    async fn generate(&self, topic: &str) -> Result<String, GenerationError> {
        match self {
            StubWriter::Text(text) => Ok(format!("# {topic}\n\n{text}")),
            StubWriter::Failing => Err(GenerationError::Api {
                status: 503,
                body: "upstream secret detail".to_string(),
            }),
        }
    }
}

/// Renderer that always fails.
pub struct BrokenRenderer;

impl PageRenderer for BrokenRenderer {
    fn render(&self, page: &Page<'_>) -> Result<String, RenderError> {
        Err(RenderError {
            template: page.template_name(),
            reason: "template missing".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, using the
/// given collaborators. Goes through the same `build_app_router` as
/// `main.rs`.
pub fn build_app(
    store: Arc<dyn ArticleStore>,
    writer: Arc<dyn ArticleWriter>,
    renderer: Arc<dyn PageRenderer>,
) -> Router {
    let state = AppState {
        store,
        writer,
        renderer,
    };
    build_app_router(state, &test_config())
}

/// App over an empty in-memory store and a writer that always succeeds.
/// Returns the store too so tests can seed or inspect it.
pub fn build_test_app() -> (Router, Arc<MemoryArticleStore>) {
    let store = Arc::new(MemoryArticleStore::new());
    let app = build_app(
        store.clone(),
        Arc::new(StubWriter::Text("Generated body.")),
        Arc::new(HtmlRenderer),
    );
    (app, store)
}

/// App whose store behaves like an unreachable database.
pub fn build_unavailable_app() -> Router {
    build_app(
        Arc::new(MemoryArticleStore::unavailable()),
        Arc::new(StubWriter::Text("Generated body.")),
        Arc::new(HtmlRenderer),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Assert `response` is a 303 to `location`.
pub fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").and_then(|v| v.to_str().ok()),
        Some(location)
    );
}
