use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the auth and entry services. HTML flows translate
/// the recoverable kinds into a redirect with a flash message; API flows
/// let them render as a JSON error body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Auth(String),
    #[error("Not logged in")]
    Unauthenticated,
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("internal error")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Auth(_) | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translate a unique-constraint violation into a Conflict, leaving
    /// every other database error as-is.
    pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> ApiError {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict(message.to_string())
            }
            _ => ApiError::Database(err),
        }
    }

    /// True for the kinds an HTML form flow reports back to the user.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ApiError::Database(_) | ApiError::Internal(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Database(ref e) => error!(error = %e, "database error"),
            ApiError::Internal(ref e) => error!(error = %e, "internal error"),
            _ => {}
        }
        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}
