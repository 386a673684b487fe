//! JSON handlers for generating, saving, listing, updating and deleting
//! articles.

use axum::extract::State;
use axum::Json;
use quill_core::article::{validate_topic, ArticleDraft};
use quill_core::types::DbId;
use quill_db::models::article::ArticleSummary;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath};
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveArticleRequest {
    pub topic: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateArticleRequest {
    pub topic: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub topic: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SaveArticleResponse {
    pub success: bool,
    pub message: &'static str,
    pub blog_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub blogs: Vec<ArticleSummary>,
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// POST /generate
///
/// Generate article text for a topic. Nothing is persisted.
pub async fn generate_article(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    let topic = validate_topic(&input.topic)?;

    let content = state.writer.generate(topic).await?;

    Ok(Json(GenerateResponse {
        success: true,
        topic: topic.to_string(),
        content,
    }))
}

/// POST /save
///
/// Persist a generated (or hand-written) article.
pub async fn save_article(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SaveArticleRequest>,
) -> AppResult<Json<SaveArticleResponse>> {
    let draft = ArticleDraft::new(&input.topic, &input.content)?;

    let id = state.store.create(&draft.topic, &draft.content).await?;

    Ok(Json(SaveArticleResponse {
        success: true,
        message: "Blog saved successfully!",
        blog_id: id,
    }))
}

/// GET /api/blogs
///
/// All articles, newest first, with previews.
pub async fn list_articles(State(state): State<AppState>) -> AppResult<Json<ArticleListResponse>> {
    let blogs = state.store.list_all().await?;
    Ok(Json(ArticleListResponse { blogs }))
}

/// POST /edit/{id}
///
/// Replace an article's topic and content. An unknown id is reported as a
/// failed update, not a 404.
pub async fn update_article(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
    ValidJson(input): ValidJson<UpdateArticleRequest>,
) -> AppResult<Json<MessageResponse>> {
    let draft = ArticleDraft::new(&input.topic, &input.content)?;

    if !state.store.update(id, &draft.topic, &draft.content).await? {
        tracing::warn!(article_id = id, "Update matched no article");
        return Err(AppError::OperationFailed("Failed to update blog"));
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Blog updated successfully!",
    }))
}

/// DELETE /delete/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !state.store.delete(id).await? {
        tracing::warn!(article_id = id, "Delete matched no article");
        return Err(AppError::OperationFailed("Failed to delete blog"));
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Blog deleted successfully!",
    }))
}
