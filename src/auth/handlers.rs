use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{instrument, warn};

use crate::auth::dto::{FlashParams, LoginForm, RegisterForm};
use crate::auth::services;
use crate::auth::session::Session;
use crate::error::ApiError;
use crate::pages::templates;
use crate::state::AppState;

/// Encode a flash message for the query string. Messages are plain
/// words and spaces, so `+` encoding is all that is needed.
fn flash(msg: &str) -> String {
    msg.replace(' ', "+")
}

pub async fn register_page(Query(params): Query<FlashParams>) -> Html<String> {
    Html(templates::register_page(&params))
}

#[instrument(skip(state, form))]
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, ApiError> {
    match services::register(&state.db, form).await {
        Ok(_) => Ok(Redirect::to("/login?notice=Registration+successful")),
        Err(e) if e.is_user_facing() => {
            warn!(error = %e, "registration rejected");
            Ok(Redirect::to(&format!("/register?error={}", flash(&e.to_string()))))
        }
        Err(e) => Err(e),
    }
}

pub async fn login_page(Query(params): Query<FlashParams>) -> Html<String> {
    Html(templates::login_page(&params))
}

#[instrument(skip(state, jar, form))]
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    match services::login(&state.db, &form.name, &form.password).await {
        Ok(user) => {
            let token =
                Session::create(&state.db, user.id, state.config.session.ttl_minutes).await?;
            let cookie = Cookie::build((state.config.session.cookie_name.clone(), token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            Ok((jar.add(cookie), Redirect::to("/home")))
        }
        Err(e) if e.is_user_facing() => {
            warn!(error = %e, "login rejected");
            Ok((
                jar,
                Redirect::to(&format!("/login?error={}", flash(&e.to_string()))),
            ))
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let cookie_name = state.config.session.cookie_name.clone();
    if let Some(cookie) = jar.get(&cookie_name) {
        Session::delete_by_token(&state.db, cookie.value()).await?;
    }
    let jar = jar.remove(Cookie::build((cookie_name, "")).path("/").build());
    Ok((jar, Redirect::to("/login?notice=Logged+out")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_encodes_spaces() {
        assert_eq!(flash("Passwords do not match"), "Passwords+do+not+match");
        assert_eq!(flash("Saved"), "Saved");
    }
}
