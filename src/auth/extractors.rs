use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::session::{Session, SessionUser};
use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the session cookie to a user without rejecting anonymous
/// requests. Each route decides what anonymity means: a redirect for
/// HTML pages, an error object or empty list for the JSON endpoints.
pub struct MaybeUser(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(&state.config.session.cookie_name) else {
            return Ok(MaybeUser(None));
        };
        let user = Session::find_user(&state.db, cookie.value()).await?;
        Ok(MaybeUser(user))
    }
}
