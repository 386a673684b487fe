//! Idempotent schema bootstrap for the `articles` table.

use sqlx::{Connection, PgConnection};

/// Statements applied in order inside one transaction. Every statement is
/// safe to re-run against an existing schema.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS articles (
        id BIGSERIAL PRIMARY KEY,
        topic VARCHAR(500) NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT ck_articles_updated_after_created CHECK (updated_at >= created_at)
    )",
    "CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles (created_at)",
    "CREATE INDEX IF NOT EXISTS idx_articles_topic_prefix ON articles (LEFT(topic, 100))",
    "CREATE OR REPLACE FUNCTION set_articles_updated_at() RETURNS TRIGGER AS $$
     BEGIN
        NEW.updated_at = NOW();
        RETURN NEW;
     END;
     $$ LANGUAGE plpgsql",
    "DROP TRIGGER IF EXISTS trg_articles_updated_at ON articles",
    "CREATE TRIGGER trg_articles_updated_at
        BEFORE UPDATE ON articles
        FOR EACH ROW EXECUTE FUNCTION set_articles_updated_at()",
];

/// Create the `articles` table, its indexes and the `updated_at` trigger
/// if they are missing.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    let mut tx = conn.begin().await?;
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await
}
