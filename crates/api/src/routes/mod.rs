pub mod articles;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// GET    /                 home page
/// GET    /dashboard        article list page
/// GET    /blog/{id}        article page
/// GET    /edit/{id}        edit page
///
/// POST   /generate         generate article text
/// POST   /save             save article
/// POST   /edit/{id}        update article
/// DELETE /delete/{id}      delete article
/// GET    /api/blogs        list articles (JSON)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(articles::router())
}
