use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Server-rendered pages. The edit page shares its path with the update
/// endpoint and is registered in [`super::articles::router`].
///
/// ```text
/// GET /                home
/// GET /dashboard       dashboard
/// GET /blog/{id}       view_article
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/dashboard", get(pages::dashboard))
        .route("/blog/{id}", get(pages::view_article))
}
