use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};
use tracing::info;

/// Wire format for all persisted timestamps, matching `datetime('now')`
/// so expiry comparisons work inside SQLite.
const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn format_timestamp(t: OffsetDateTime) -> String {
    t.format(&TIMESTAMP_FORMAT)
        .expect("timestamp format is static")
}

/// Current UTC time as a storage timestamp string.
pub fn timestamp() -> String {
    format_timestamp(OffsetDateTime::now_utc())
}

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!(database_url, "database ready");
    Ok(pool)
}

/// Single-connection in-memory pool with the schema applied. SQLite gives
/// every connection its own `:memory:` database, so the pool is capped at
/// one connection.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}
