use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save_entry", post(handlers::save_entry))
        .route("/entries/:genre", get(handlers::list_entries))
}
