//! Persistence layer for articles.
//!
//! Exposes pool construction and bootstrap helpers used at startup, the
//! [`ArticleStore`] trait handlers depend on, and its PostgreSQL and
//! in-memory implementations.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection};

pub mod memory;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub use memory::MemoryArticleStore;
pub use store::{ArticleStore, PgArticleStore};

pub type DbPool = sqlx::PgPool;

/// Maintenance database used when the target database does not exist yet.
const MAINTENANCE_DATABASE: &str = "postgres";

/// PostgreSQL `duplicate_database` error code.
const DUPLICATE_DATABASE: &str = "42P04";

/// Build connection options from discrete settings.
pub fn connect_options(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
    database: &str,
) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(host)
        .port(port)
        .username(user)
        .password(password)
        .database(database)
}

/// Create a connection pool. Connections are opened lazily per operation.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the database named `name` if it does not exist.
///
/// Connects to the maintenance database with the same credentials, so the
/// configured user needs `CREATEDB` the first time this runs.
pub async fn ensure_database(options: &PgConnectOptions, name: &str) -> Result<(), sqlx::Error> {
    let maintenance = options.clone().database(MAINTENANCE_DATABASE);
    let mut conn = PgConnection::connect_with(&maintenance).await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(name)
            .fetch_one(&mut conn)
            .await?;

    if exists {
        tracing::debug!(database = name, "Database already exists");
    } else {
        let statement = format!("CREATE DATABASE \"{}\"", name.replace('"', "\"\""));
        match sqlx::query(&statement).execute(&mut conn).await {
            Ok(_) => tracing::info!(database = name, "Database created"),
            // Another instance created it between the check and the create.
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(DUPLICATE_DATABASE) =>
            {
                tracing::debug!(database = name, "Database created concurrently");
            }
            Err(err) => return Err(err),
        }
    }

    conn.close().await
}
