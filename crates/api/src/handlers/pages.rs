//! HTML page handlers.
//!
//! These never surface an error page for a missing or unloadable article:
//! they redirect to the dashboard with a [`Notice`] instead.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use quill_core::types::DbId;
use quill_db::models::article::Article;
use serde::Deserialize;

use crate::error::AppError;
use crate::render::{Notice, Page};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub notice: Option<String>,
}

/// Render `page`, mapping a renderer failure to a 500.
fn render(state: &AppState, page: &Page<'_>) -> Response {
    match state.renderer.render(page) {
        Ok(html) => Html(html).into_response(),
        Err(err) => AppError::InternalError(err.to_string()).into_response(),
    }
}

/// Load an article for a page, or the notice to redirect with.
async fn load_article(
    state: &AppState,
    id: Result<Path<DbId>, PathRejection>,
) -> Result<Article, Notice> {
    let Ok(Path(id)) = id else {
        return Err(Notice::NotFound);
    };
    match state.store.get(id).await {
        Ok(Some(article)) => Ok(article),
        Ok(None) => {
            tracing::debug!(article_id = id, "Article not found");
            Err(Notice::NotFound)
        }
        Err(_) => Err(Notice::LoadFailed),
    }
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Response {
    render(&state, &Page::Home)
}

/// GET /dashboard
///
/// Lists every article. A storage failure renders an empty list with a
/// notice rather than an error.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Response {
    let mut notice = params.notice.as_deref().and_then(Notice::from_code);

    let articles = state.store.list_all().await.unwrap_or_else(|_| {
        notice = Some(Notice::LoadFailed);
        Vec::new()
    });

    render(
        &state,
        &Page::Dashboard {
            articles: &articles,
            notice,
        },
    )
}

/// GET /blog/{id}
pub async fn view_article(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> Response {
    match load_article(&state, id).await {
        Ok(article) => render(&state, &Page::Article { article: &article }),
        Err(notice) => notice.redirect().into_response(),
    }
}

/// GET /edit/{id}
pub async fn edit_form(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> Response {
    match load_article(&state, id).await {
        Ok(article) => render(&state, &Page::Edit { article: &article }),
        Err(notice) => notice.redirect().into_response(),
    }
}
