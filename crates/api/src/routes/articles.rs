use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{articles, pages};
use crate::state::AppState;

/// JSON article endpoints, plus the edit page that shares `/edit/{id}`.
///
/// ```text
/// POST   /generate         generate_article
/// POST   /save             save_article
/// GET    /edit/{id}        pages::edit_form
/// POST   /edit/{id}        update_article
/// DELETE /delete/{id}      delete_article
/// GET    /api/blogs        list_articles
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(articles::generate_article))
        .route("/save", post(articles::save_article))
        .route(
            "/edit/{id}",
            get(pages::edit_form).post(articles::update_article),
        )
        .route("/delete/{id}", delete(articles::delete_article))
        .route("/api/blogs", get(articles::list_articles))
}
