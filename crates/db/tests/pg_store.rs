//! Integration tests for `PgArticleStore` against a real PostgreSQL.
//!
//! Ignored by default: run with `DATABASE_URL` set and `--ignored`.
//! `#[sqlx::test]` provisions a fresh database per test; the schema is
//! created through `ensure_schema` rather than migrations.

use std::time::Duration;

use assert_matches::assert_matches;
use quill_core::error::CoreError;
use quill_db::{ArticleStore, PgArticleStore};
use sqlx::PgPool;

async fn store(pool: PgPool) -> PgArticleStore {
    let store = PgArticleStore::new(pool);
    store.ensure_schema().await.unwrap();
    store
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn ensure_schema_is_idempotent(pool: PgPool) {
    let store = store(pool).await;
    store.ensure_schema().await.unwrap();

    let indexes: Vec<(String,)> = sqlx::query_as(
        "SELECT indexname::TEXT FROM pg_indexes WHERE tablename = 'articles' ORDER BY indexname",
    )
    .fetch_all(store.pool())
    .await
    .unwrap();
    let names: Vec<_> = indexes.into_iter().map(|(n,)| n).collect();
    assert!(names.contains(&"idx_articles_created_at".to_string()));
    assert!(names.contains(&"idx_articles_topic_prefix".to_string()));
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn create_then_get_round_trip(pool: PgPool) {
    let store = store(pool).await;

    let id = store.create("  Cats ", "Cats are great pets.").await.unwrap();
    let article = store.get(id).await.unwrap().expect("article should exist");

    assert_eq!(article.topic, "Cats");
    assert_eq!(article.content, "Cats are great pets.");
    assert_eq!(article.created_at, article.updated_at);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn list_is_newest_first_with_previews(pool: PgPool) {
    let store = store(pool).await;
    assert!(store.list_all().await.unwrap().is_empty());

    let first = store.create("First", &"a".repeat(250)).await.unwrap();
    let second = store.create("Second", "short").await.unwrap();

    let listed = store.list_all().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].article.id, second);
    assert_eq!(listed[0].preview, "short");
    assert_eq!(listed[1].article.id, first);
    assert!(listed[1].preview.ends_with("..."));
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn update_refreshes_updated_at(pool: PgPool) {
    let store = store(pool).await;
    let id = store.create("Draft", "v1").await.unwrap();
    let before = store.get(id).await.unwrap().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert!(store.update(id, "Final", "v2").await.unwrap());
    let after = store.get(id).await.unwrap().unwrap();

    assert_eq!(after.topic, "Final");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    assert!(!store.update(id + 1000, "Ghost", "x").await.unwrap());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn delete_and_count(pool: PgPool) {
    let store = store(pool).await;
    let id = store.create("Temp", "body").await.unwrap();
    assert_eq!(store.count().await, 1);

    assert!(store.delete(id).await.unwrap());
    assert!(!store.delete(id).await.unwrap());
    assert!(store.get(id).await.unwrap().is_none());
    assert_eq!(store.count().await, 0);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn blank_input_is_rejected_before_insert(pool: PgPool) {
    let store = store(pool).await;
    assert_matches!(store.create(" ", "body").await, Err(CoreError::Validation(_)));
    assert_eq!(store.count().await, 0);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires DATABASE_URL"]
async fn count_on_closed_pool_is_zero(pool: PgPool) {
    let store = store(pool).await;
    store.create("Cats", "body").await.unwrap();
    assert_eq!(store.count().await, 1);

    store.pool().close().await;
    assert_eq!(store.count().await, 0);
    assert_matches!(store.ping().await, Err(CoreError::Storage(_)));
}
