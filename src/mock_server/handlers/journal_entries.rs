//! Journal entry endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::{
    accounting_error, accounting_result, check_accounting_auth, take_key, ERRNO_INVALID_FIELD,
};
use crate::mock_server::state::MockState;
use crate::JournalEntry;

/// POST /accounting/account/{account_id}/journal_entries/journal_entries
///
/// Entries whose debits and credits differ are refused.
pub async fn create_journal_entry(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = check_accounting_auth(&state, &headers) {
        return rejection;
    }

    let entry: JournalEntry = match serde_json::from_value(take_key(&mut body, "journal_entry")) {
        Ok(entry) => entry,
        Err(e) => {
            return accounting_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                ERRNO_INVALID_FIELD,
                &format!("Invalid journal entry: {e}"),
            )
        }
    };
    if !entry.is_balanced() {
        return accounting_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            ERRNO_INVALID_FIELD,
            "Debits and credits must balance.",
        );
    }

    let created = state.create_journal_entry(&account_id, entry);
    accounting_result(StatusCode::OK, json!({ "journal_entry": created }))
}
