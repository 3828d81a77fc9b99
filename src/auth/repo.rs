use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

impl User {
    /// Find a user by login name.
    pub async fn find_by_name(db: &SqlitePool, name: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, phone, email, password_hash, role, created_at
            FROM users
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with a hashed password. Bubbles the unique
    /// violation up to the caller for conflict translation.
    pub async fn create(
        db: &SqlitePool,
        name: &str,
        phone: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, phone, email, password_hash, role, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, phone, email, password_hash, role, created_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(crate::db::timestamp())
        .fetch_one(db)
        .await
    }

    /// Total number of registered users.
    pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    #[tokio::test]
    async fn create_and_find_by_name() {
        let db = connect_in_memory().await.expect("pool");
        let user = User::create(&db, "ada", "", "ada@x.com", "hash", ROLE_MEMBER)
            .await
            .expect("create");
        assert_eq!(user.name, "ada");
        assert_eq!(user.role, ROLE_MEMBER);
        assert!(!user.created_at.is_empty());

        let found = User::find_by_name(&db, "ada").await.expect("query");
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(User::find_by_name(&db, "babbage")
            .await
            .expect("query")
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_name_is_a_unique_violation() {
        let db = connect_in_memory().await.expect("pool");
        User::create(&db, "ada", "", "ada@x.com", "hash", ROLE_MEMBER)
            .await
            .expect("create");
        let err = User::create(&db, "ada", "", "other@x.com", "hash", ROLE_MEMBER)
            .await
            .unwrap_err();
        assert!(matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation()));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let db = connect_in_memory().await.expect("pool");
        User::create(&db, "ada", "", "ada@x.com", "hash", ROLE_MEMBER)
            .await
            .expect("create");
        let err = User::create(&db, "grace", "", "ada@x.com", "hash", ROLE_MEMBER)
            .await
            .unwrap_err();
        assert!(matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation()));
    }

    #[tokio::test]
    async fn count_tracks_inserts() {
        let db = connect_in_memory().await.expect("pool");
        assert_eq!(User::count(&db).await.expect("count"), 0);
        User::create(&db, "ada", "", "ada@x.com", "hash", ROLE_ADMIN)
            .await
            .expect("create");
        assert_eq!(User::count(&db).await.expect("count"), 1);
    }
}
