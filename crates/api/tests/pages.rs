//! Integration tests for the server-rendered pages.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use common::{
    assert_redirect, body_json, body_text, build_app, build_test_app, build_unavailable_app, get,
    BrokenRenderer, StubWriter,
};
use quill_db::{ArticleStore, MemoryArticleStore};

// ---------------------------------------------------------------------------
// GET / and GET /dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn home_renders_generator_page() {
    let (app, _) = build_test_app();

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html")));
    assert!(body_text(response).await.contains("Generate a blog post"));
}

#[tokio::test]
async fn dashboard_lists_articles_with_escaped_topics() {
    let (app, store) = build_test_app();
    store.create("<b>Cats</b>", "Cats are great.").await.unwrap();

    let response = get(app, "/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("&lt;b&gt;Cats&lt;/b&gt;"));
    assert!(!html.contains("<b>Cats</b>"));
    assert!(html.contains("Cats are great."));
}

#[tokio::test]
async fn dashboard_shows_notice_from_query() {
    let (app, _) = build_test_app();

    let html = body_text(get(app, "/dashboard?notice=not_found").await).await;
    assert!(html.contains("Blog not found"));
}

#[tokio::test]
async fn dashboard_ignores_unknown_notice() {
    let (app, _) = build_test_app();

    let response = get(app, "/dashboard?notice=bogus").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.contains("class=\"notice\""));
}

#[tokio::test]
async fn dashboard_with_unavailable_store_renders_load_notice() {
    let response = get(build_unavailable_app(), "/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Error loading blogs. Please try again."));
}

// ---------------------------------------------------------------------------
// GET /blog/{id} and GET /edit/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn view_renders_existing_article() {
    let (app, store) = build_test_app();
    let id = store.create("Cats", "Cats are great.").await.unwrap();

    let response = get(app, &format!("/blog/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<h1>Cats</h1>"));
    assert!(html.contains("Cats are great."));
}

#[tokio::test]
async fn view_of_missing_article_redirects_with_notice() {
    let (app, _) = build_test_app();

    let response = get(app, "/blog/999").await;
    assert_redirect(&response, "/dashboard?notice=not_found");
}

#[tokio::test]
async fn view_with_non_numeric_id_redirects_with_notice() {
    let (app, _) = build_test_app();

    let response = get(app, "/blog/abc").await;
    assert_redirect(&response, "/dashboard?notice=not_found");
}

#[tokio::test]
async fn view_with_unavailable_store_redirects_with_load_notice() {
    let response = get(build_unavailable_app(), "/blog/1").await;
    assert_redirect(&response, "/dashboard?notice=load_failed");
}

#[tokio::test]
async fn edit_form_prefills_article() {
    let (app, store) = build_test_app();
    let id = store.create("Cats", "Cats are great.").await.unwrap();

    let response = get(app, &format!("/edit/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Edit blog"));
    assert!(html.contains("value=\"Cats\""));
    assert!(html.contains("Cats are great."));
}

#[tokio::test]
async fn edit_form_of_missing_article_redirects_with_notice() {
    let (app, _) = build_test_app();

    let response = get(app, "/edit/999").await;
    assert_redirect(&response, "/dashboard?notice=not_found");
}

// ---------------------------------------------------------------------------
// Renderer failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn renderer_failure_is_sanitized_500() {
    let store = Arc::new(MemoryArticleStore::new());
    let app = build_app(
        store,
        Arc::new(StubWriter::Text("body")),
        Arc::new(BrokenRenderer),
    );

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert!(!body.to_string().contains("template missing"));
}
