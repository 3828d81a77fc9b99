use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// Entry row. `meta` stays a serialized JSON string here; it is only
/// decoded at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub genre: String,
    pub title: String,
    pub content: String,
    pub meta: String,
    pub created_at: String,
}

impl Entry {
    /// Persist a new entry stamped with the current server time.
    pub async fn create(
        db: &SqlitePool,
        user_id: i64,
        genre: &str,
        title: &str,
        content: &str,
        meta: &str,
    ) -> Result<Entry, sqlx::Error> {
        sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (user_id, genre, title, content, meta, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, genre, title, content, meta, created_at
            "#,
        )
        .bind(user_id)
        .bind(genre)
        .bind(title)
        .bind(content)
        .bind(meta)
        .bind(crate::db::timestamp())
        .fetch_one(db)
        .await
    }

    /// Entries owned by one user in one genre, newest first.
    pub async fn list_by_user_genre(
        db: &SqlitePool,
        user_id: i64,
        genre: &str,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, user_id, genre, title, content, meta, created_at
            FROM entries
            WHERE user_id = ? AND genre = ?
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .bind(genre)
        .fetch_all(db)
        .await
    }
}
