//! Article row and listing models.

use quill_core::article::preview;
use quill_core::types::{serialize_display_time, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `articles` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub topic: String,
    pub content: String,
    #[serde(serialize_with = "serialize_display_time")]
    pub created_at: Timestamp,
    #[serde(serialize_with = "serialize_display_time")]
    pub updated_at: Timestamp,
}

/// An article as it appears in listings, with its derived preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSummary {
    #[serde(flatten)]
    pub article: Article,
    pub preview: String,
}

impl From<Article> for ArticleSummary {
    fn from(article: Article) -> Self {
        let preview = preview(&article.content);
        Self { article, preview }
    }
}
