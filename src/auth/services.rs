use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::dto::RegisterForm;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::{User, ROLE_ADMIN, ROLE_MEMBER};
use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Create a new account. The first registered user becomes the admin;
/// everyone after that is a plain member.
pub async fn register(db: &SqlitePool, mut form: RegisterForm) -> Result<User, ApiError> {
    form.name = form.name.trim().to_string();
    form.phone = form.phone.trim().to_string();
    form.email = form.email.trim().to_lowercase();

    if form.name.is_empty() || form.email.is_empty() || form.password.is_empty() {
        return Err(ApiError::Validation("Please fill required fields".into()));
    }
    if form.password != form.confirm {
        return Err(ApiError::Validation("Passwords do not match".into()));
    }
    if !is_valid_email(&form.email) {
        return Err(ApiError::Validation("Invalid email address".into()));
    }

    let role = if User::count(db).await? == 0 {
        ROLE_ADMIN
    } else {
        ROLE_MEMBER
    };

    let hash = hash_password(&form.password)?;
    let user = User::create(db, &form.name, &form.phone, &form.email, &hash, role)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "User exists"))?;

    info!(user_id = user.id, name = %user.name, role = %user.role, "user registered");
    Ok(user)
}

/// Check credentials for a login name.
pub async fn login(db: &SqlitePool, name: &str, password: &str) -> Result<User, ApiError> {
    let name = name.trim();
    let user = User::find_by_name(db, name)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login with wrong password");
        return Err(ApiError::Auth("Wrong password".into()));
    }

    info!(user_id = user.id, name = %user.name, "user logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    fn form(name: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: name.into(),
            phone: String::new(),
            email: email.into(),
            password: password.into(),
            confirm: confirm.into(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[tokio::test]
    async fn register_then_login_succeeds() {
        let db = connect_in_memory().await.expect("pool");
        let user = register(&db, form("a", "a@x.com", "pw", "pw"))
            .await
            .expect("register");
        assert_eq!(user.name, "a");

        let logged_in = login(&db, "a", "pw").await.expect("login");
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let db = connect_in_memory().await.expect("pool");
        register(&db, form("a", "a@x.com", "pw", "pw"))
            .await
            .expect("register");
        let err = login(&db, "a", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[tokio::test]
    async fn login_with_unknown_name_fails() {
        let db = connect_in_memory().await.expect("pool");
        let err = login(&db, "ghost", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn mismatched_confirm_never_creates_a_row() {
        let db = connect_in_memory().await.expect("pool");
        let err = register(&db, form("a", "a@x.com", "pw", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(User::count(&db).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let db = connect_in_memory().await.expect("pool");
        for bad in [
            form("", "a@x.com", "pw", "pw"),
            form("a", "", "pw", "pw"),
            form("a", "a@x.com", "", ""),
        ] {
            let err = register(&db, bad).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn duplicate_name_and_email_conflict() {
        let db = connect_in_memory().await.expect("pool");
        register(&db, form("a", "a@x.com", "pw", "pw"))
            .await
            .expect("register");

        let err = register(&db, form("a", "b@x.com", "pw", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let err = register(&db, form("b", "a@x.com", "pw", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn first_user_is_admin_rest_are_members() {
        let db = connect_in_memory().await.expect("pool");
        let first = register(&db, form("a", "a@x.com", "pw", "pw"))
            .await
            .expect("register");
        let second = register(&db, form("b", "b@x.com", "pw", "pw"))
            .await
            .expect("register");
        assert_eq!(first.role, ROLE_ADMIN);
        assert_eq!(second.role, ROLE_MEMBER);
    }
}
