use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{instrument, warn};

use crate::auth::extractors::MaybeUser;
use crate::auth::repo::{User, ROLE_ADMIN};
use crate::error::ApiError;
use crate::pages::genre::Genre;
use crate::pages::templates;
use crate::state::AppState;

pub async fn index(MaybeUser(user): MaybeUser) -> Redirect {
    if user.is_some() {
        Redirect::to("/home")
    } else {
        Redirect::to("/login")
    }
}

#[instrument(skip_all)]
pub async fn home(MaybeUser(user): MaybeUser) -> Response {
    match user {
        Some(user) => Html(templates::home_page(&user.name)).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

#[instrument(skip_all, fields(slug = %slug))]
pub async fn genre_page(Path(slug): Path<String>, MaybeUser(user): MaybeUser) -> Response {
    let Some(genre) = Genre::from_slug(&slug) else {
        warn!("unknown genre page");
        return (StatusCode::NOT_FOUND, "page not found").into_response();
    };
    let user_name = user.as_ref().map(|u| u.name.as_str());
    Html(templates::genre_page(genre, user_name)).into_response()
}

/// Owner-only debug view: total user count. Gated by the `admin` role
/// rather than a hardcoded name.
#[instrument(skip(state))]
pub async fn admin(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Response, ApiError> {
    let user = match user {
        Some(user) if user.role == ROLE_ADMIN => user,
        _ => {
            warn!("admin page denied");
            return Ok(
                (StatusCode::FORBIDDEN, Html(templates::access_denied())).into_response()
            );
        }
    };

    let count = User::count(&state.db).await?;
    Ok(Html(templates::admin_page(&user.name, count)).into_response())
}
