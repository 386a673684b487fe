//! In-memory [`ArticleStore`] used by tests in place of PostgreSQL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use quill_core::article::ArticleDraft;
use quill_core::error::CoreError;
use quill_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::article::{Article, ArticleSummary};
use crate::store::ArticleStore;

#[derive(Default)]
struct Inner {
    last_id: DbId,
    rows: BTreeMap<DbId, Article>,
}

/// Article store holding rows in a map behind an async `RwLock`.
///
/// Ids start at 1 and are never reused, mirroring a `BIGSERIAL` column.
/// [`MemoryArticleStore::unavailable`] builds a store whose every
/// operation fails, for exercising error paths.
#[derive(Default)]
pub struct MemoryArticleStore {
    inner: RwLock<Inner>,
    unavailable: bool,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that behaves like an unreachable database.
    pub fn unavailable() -> Self {
        Self {
            inner: RwLock::default(),
            unavailable: true,
        }
    }

    fn check_available(&self, operation: &'static str) -> Result<(), CoreError> {
        if self.unavailable {
            tracing::error!(operation, "Article store unavailable");
            return Err(CoreError::Storage(format!("{operation} failed: store unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn ensure_schema(&self) -> Result<(), CoreError> {
        self.check_available("ensure_schema")
    }

    async fn create(&self, topic: &str, content: &str) -> Result<DbId, CoreError> {
        let draft = ArticleDraft::new(topic, content)?;
        self.check_available("create")?;

        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        let now = Utc::now();
        inner.rows.insert(
            id,
            Article {
                id,
                topic: draft.topic,
                content: draft.content,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ArticleSummary>, CoreError> {
        self.check_available("list_all")?;

        let inner = self.inner.read().await;
        let mut articles: Vec<Article> = inner.rows.values().cloned().collect();
        articles.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(articles.into_iter().map(ArticleSummary::from).collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<Article>, CoreError> {
        self.check_available("get")?;
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: DbId, topic: &str, content: &str) -> Result<bool, CoreError> {
        let draft = ArticleDraft::new(topic, content)?;
        self.check_available("update")?;

        let mut inner = self.inner.write().await;
        let Some(article) = inner.rows.get_mut(&id) else {
            return Ok(false);
        };
        article.topic = draft.topic;
        article.content = draft.content;
        article.updated_at = Utc::now().max(article.created_at);
        Ok(true)
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        self.check_available("delete")?;
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> i64 {
        if self.check_available("count").is_err() {
            return 0;
        }
        self.inner.read().await.rows.len() as i64
    }

    async fn ping(&self) -> Result<(), CoreError> {
        self.check_available("ping")
    }
}
