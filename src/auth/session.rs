use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::{FromRow, SqlitePool};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::db::format_timestamp;

/// Server-side session row. Only the SHA-256 of the cookie token is
/// stored; the raw token exists only in the client's cookie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: String,
    pub created_at: String,
}

/// The authenticated identity attached to a request.
#[derive(Debug, Clone, FromRow)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub role: String,
}

/// Generate a random session token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a token for storage.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

impl Session {
    /// Create a session for a user and return the raw token to put in
    /// the cookie.
    pub async fn create(
        db: &SqlitePool,
        user_id: i64,
        ttl_minutes: i64,
    ) -> Result<String, sqlx::Error> {
        let token = generate_token();
        let now = OffsetDateTime::now_utc();
        let expires_at = format_timestamp(now + Duration::minutes(ttl_minutes));

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(hash_token(&token))
        .bind(&expires_at)
        .bind(format_timestamp(now))
        .execute(db)
        .await?;

        debug!(user_id, %expires_at, "session created");
        Ok(token)
    }

    /// Resolve a raw cookie token to its user. Expired sessions are
    /// treated as absent.
    pub async fn find_user(
        db: &SqlitePool,
        token: &str,
    ) -> Result<Option<SessionUser>, sqlx::Error> {
        sqlx::query_as::<_, SessionUser>(
            r#"
            SELECT u.id, u.name, u.role
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = ? AND s.expires_at > datetime('now')
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(db)
        .await
    }

    /// Drop the session for a token. A no-op when the token is unknown,
    /// which keeps logout idempotent.
    pub async fn delete_by_token(db: &SqlitePool, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(hash_token(token))
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::{User, ROLE_MEMBER};
    use crate::db::connect_in_memory;

    #[test]
    fn tokens_are_random_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn token_hash_is_stable_and_distinct_from_token() {
        let token = generate_token();
        assert_eq!(hash_token(&token), hash_token(&token));
        assert_ne!(hash_token(&token), token);
    }

    async fn seed_user(db: &SqlitePool) -> User {
        User::create(db, "ada", "", "ada@x.com", "hash", ROLE_MEMBER)
            .await
            .expect("create user")
    }

    #[tokio::test]
    async fn create_then_find_resolves_the_user() {
        let db = connect_in_memory().await.expect("pool");
        let user = seed_user(&db).await;
        let token = Session::create(&db, user.id, 60).await.expect("session");

        let found = Session::find_user(&db, &token).await.expect("lookup");
        let found = found.expect("session should resolve");
        assert_eq!(found.id, user.id);
        assert_eq!(found.name, "ada");
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let db = connect_in_memory().await.expect("pool");
        seed_user(&db).await;
        let found = Session::find_user(&db, "bogus").await.expect("lookup");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn expired_session_no_longer_authenticates() {
        let db = connect_in_memory().await.expect("pool");
        let user = seed_user(&db).await;
        let token = generate_token();
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at)
            VALUES (?, ?, ?, '2000-01-01 00:00:00', '2000-01-01 00:00:00')
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user.id)
        .bind(hash_token(&token))
        .execute(&db)
        .await
        .expect("insert expired session");

        let found = Session::find_user(&db, &token).await.expect("lookup");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let db = connect_in_memory().await.expect("pool");
        let user = seed_user(&db).await;
        let token = Session::create(&db, user.id, 60).await.expect("session");

        Session::delete_by_token(&db, &token).await.expect("delete");
        Session::delete_by_token(&db, &token)
            .await
            .expect("second delete is harmless");
        assert!(Session::find_user(&db, &token)
            .await
            .expect("lookup")
            .is_none());
    }
}
