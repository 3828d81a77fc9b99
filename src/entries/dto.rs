use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /save_entry`. The genre is accepted as-is; the five
/// known genres only gate page routing, not persistence.
#[derive(Debug, Deserialize)]
pub struct SaveEntryRequest {
    pub genre: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub meta: Option<Value>,
}

/// Acknowledgment for a save. `time` is present only on success.
#[derive(Debug, Serialize)]
pub struct SaveReceipt {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl SaveReceipt {
    pub fn saved(time: String) -> Self {
        Self {
            status: "ok",
            message: "Saved",
            time: Some(time),
        }
    }

    pub fn not_logged_in() -> Self {
        Self {
            status: "error",
            message: "Not logged in",
            time: None,
        }
    }
}

/// One element of the `GET /entries/:genre` response.
#[derive(Debug, Serialize)]
pub struct EntryItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub meta: Value,
    pub created_at: String,
}
