//! The article store seam and its PostgreSQL implementation.
//!
//! Handlers hold an `Arc<dyn ArticleStore>`; production wires in
//! [`PgArticleStore`], tests wire in [`crate::MemoryArticleStore`].

use async_trait::async_trait;
use quill_core::article::ArticleDraft;
use quill_core::error::CoreError;
use quill_core::types::DbId;
use sqlx::pool::PoolConnection;
use sqlx::Postgres;

use crate::models::article::{Article, ArticleSummary};
use crate::repositories::ArticleRepo;
use crate::DbPool;

/// Persistence operations for articles.
///
/// Implementations never leak driver errors: failures surface as
/// [`CoreError::Storage`] or, for [`ArticleStore::count`], as zero.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Create the backing table and indexes if absent. Idempotent.
    async fn ensure_schema(&self) -> Result<(), CoreError>;

    /// Trim and validate, then insert one article and return its id.
    async fn create(&self, topic: &str, content: &str) -> Result<DbId, CoreError>;

    /// All articles, newest first, each with a preview. Empty when there
    /// are no articles.
    async fn list_all(&self) -> Result<Vec<ArticleSummary>, CoreError>;

    /// A single article, or `None` if `id` does not exist.
    async fn get(&self, id: DbId) -> Result<Option<Article>, CoreError>;

    /// Trim and validate, then replace topic and content. Returns `false`
    /// (and writes nothing) if `id` does not exist.
    async fn update(&self, id: DbId, topic: &str, content: &str) -> Result<bool, CoreError>;

    /// Returns `false` if `id` did not exist.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    /// Total number of articles, or 0 if the store is unreachable.
    async fn count(&self) -> i64;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), CoreError>;
}

/// Log a failed operation and convert it into a [`CoreError::Storage`].
fn storage_error(operation: &'static str, id: Option<DbId>, err: sqlx::Error) -> CoreError {
    tracing::error!(operation, article_id = ?id, error = %err, "Article store operation failed");
    CoreError::Storage(format!("{operation} failed: {err}"))
}

/// [`ArticleStore`] backed by PostgreSQL.
///
/// Every operation checks a connection out of the pool and holds it only
/// for the duration of that operation; the guard returns it on drop, on
/// both success and error paths.
#[derive(Clone)]
pub struct PgArticleStore {
    pool: DbPool,
}

impl PgArticleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn acquire(
        &self,
        operation: &'static str,
        id: Option<DbId>,
    ) -> Result<PoolConnection<Postgres>, CoreError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| storage_error(operation, id, e))
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn ensure_schema(&self) -> Result<(), CoreError> {
        let mut conn = self.acquire("ensure_schema", None).await?;
        crate::schema::ensure_schema(&mut conn)
            .await
            .map_err(|e| storage_error("ensure_schema", None, e))?;
        tracing::info!("Articles schema ready");
        Ok(())
    }

    async fn create(&self, topic: &str, content: &str) -> Result<DbId, CoreError> {
        let draft = ArticleDraft::new(topic, content)?;
        let mut conn = self.acquire("create", None).await?;
        let id = ArticleRepo::insert(&mut conn, &draft)
            .await
            .map_err(|e| storage_error("create", None, e))?;
        tracing::info!(article_id = id, "Article saved");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ArticleSummary>, CoreError> {
        let mut conn = self.acquire("list_all", None).await?;
        let articles = ArticleRepo::list(&mut conn)
            .await
            .map_err(|e| storage_error("list_all", None, e))?;
        Ok(articles.into_iter().map(ArticleSummary::from).collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<Article>, CoreError> {
        let mut conn = self.acquire("get", Some(id)).await?;
        ArticleRepo::find_by_id(&mut conn, id)
            .await
            .map_err(|e| storage_error("get", Some(id), e))
    }

    async fn update(&self, id: DbId, topic: &str, content: &str) -> Result<bool, CoreError> {
        let draft = ArticleDraft::new(topic, content)?;
        let mut conn = self.acquire("update", Some(id)).await?;
        let updated = ArticleRepo::update(&mut conn, id, &draft)
            .await
            .map_err(|e| storage_error("update", Some(id), e))?;
        if updated {
            tracing::info!(article_id = id, "Article updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut conn = self.acquire("delete", Some(id)).await?;
        let deleted = ArticleRepo::delete(&mut conn, id)
            .await
            .map_err(|e| storage_error("delete", Some(id), e))?;
        if deleted {
            tracing::info!(article_id = id, "Article deleted");
        }
        Ok(deleted)
    }

    async fn count(&self) -> i64 {
        let result = match self.pool.acquire().await {
            Ok(mut conn) => ArticleRepo::count(&mut conn).await,
            Err(err) => Err(err),
        };
        result.unwrap_or_else(|err| {
            tracing::error!(operation = "count", error = %err, "Article count unavailable");
            0
        })
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| storage_error("ping", None, e))
    }
}
