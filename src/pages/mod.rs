use axum::{routing::get, Router};

use crate::state::AppState;

pub mod genre;
pub mod handlers;
pub mod templates;

pub use genre::Genre;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/home", get(handlers::home))
        .route("/genre/:slug", get(handlers::genre_page))
        .route("/admin", get(handlers::admin))
}
