use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{instrument, warn};

use crate::auth::extractors::MaybeUser;
use crate::entries::dto::{EntryItem, SaveEntryRequest, SaveReceipt};
use crate::entries::repo::Entry;
use crate::error::ApiError;
use crate::state::AppState;

/// Stored meta that fails to parse degrades to an empty object rather
/// than poisoning the whole listing.
fn decode_meta(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| json!({}))
}

#[instrument(skip(state, body))]
pub async fn save_entry(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(body): Json<SaveEntryRequest>,
) -> Result<Json<SaveReceipt>, ApiError> {
    let Some(user) = user else {
        warn!("save_entry without a session");
        return Ok(Json(SaveReceipt::not_logged_in()));
    };

    let meta = body.meta.unwrap_or_else(|| json!({})).to_string();
    let entry = Entry::create(
        &state.db,
        user.id,
        &body.genre,
        &body.title,
        &body.content,
        &meta,
    )
    .await?;

    Ok(Json(SaveReceipt::saved(entry.created_at)))
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(genre): Path<String>,
) -> Result<Json<Vec<EntryItem>>, ApiError> {
    // Anonymous callers get an empty list, not an error. Kept from the
    // original contract.
    let Some(user) = user else {
        return Ok(Json(Vec::new()));
    };

    let rows = Entry::list_by_user_genre(&state.db, user.id, &genre).await?;
    let items = rows
        .into_iter()
        .map(|e| EntryItem {
            id: e.id,
            title: e.title,
            content: e.content,
            meta: decode_meta(&e.meta),
            created_at: e.created_at,
        })
        .collect();
    Ok(Json(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_meta_decodes_to_empty_object() {
        assert_eq!(decode_meta("not json"), json!({}));
        assert_eq!(decode_meta(""), json!({}));
        assert_eq!(decode_meta(r#"{"day3":true}"#), json!({"day3": true}));
    }
}
