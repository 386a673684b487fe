//! Repository for the `articles` table.

use quill_core::article::ArticleDraft;
use quill_core::types::DbId;
use sqlx::PgConnection;

use crate::models::article::Article;

/// Column list for articles queries.
const COLUMNS: &str = "id, topic, content, created_at, updated_at";

/// Provides CRUD operations for articles on a single connection.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a validated article, returning its generated id.
    pub async fn insert(conn: &mut PgConnection, draft: &ArticleDraft) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO articles (topic, content) VALUES ($1, $2) RETURNING id")
            .bind(&draft.topic)
            .bind(&draft.content)
            .fetch_one(conn)
            .await
    }

    /// List every article, newest first. Ties on `created_at` fall back to
    /// the id so rows inserted in the same instant keep insertion order.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Article>(&query).fetch_all(conn).await
    }

    /// Find an article by ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Replace topic and content. `updated_at` is refreshed by the
    /// `trg_articles_updated_at` trigger. Returns `true` if a row matched.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        draft: &ArticleDraft,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE articles SET topic = $1, content = $2 WHERE id = $3")
            .bind(&draft.topic)
            .bind(&draft.content)
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an article by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of articles.
    pub async fn count(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(conn)
            .await
    }
}
