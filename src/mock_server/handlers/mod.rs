//! HTTP request handlers for the mock server.
//!
//! Responses use the same envelopes as FreshBooks: accounting payloads under
//! `response.result`, accounting errors under `response.errors`, and the
//! `error`/`error_description` or `error_type`/`message` shapes on the auth
//! service.

pub mod auth;
pub mod invoices;
pub mod journal_entries;

pub use auth::*;
pub use invoices::*;
pub use journal_entries::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::mock_server::state::MockState;

/// FreshBooks errno for a request without valid credentials.
pub const ERRNO_UNAUTHORIZED: i64 = 1003;
/// FreshBooks errno for a record that does not exist.
pub const ERRNO_NOT_FOUND: i64 = 1012;
/// FreshBooks errno for a missing or invalid field.
pub const ERRNO_INVALID_FIELD: i64 = 2001;

/// The token from an `Authorization: Bearer ...` header.
pub(crate) fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// `{"response": {"result": {<key>: <value>}}}`
pub(crate) fn accounting_result(status: StatusCode, result: Value) -> Response {
    (status, Json(json!({ "response": { "result": result } }))).into_response()
}

/// `{"response": {"errors": [{"errno": ..., "message": ...}]}}`
pub(crate) fn accounting_error(status: StatusCode, errno: i64, message: &str) -> Response {
    (
        status,
        Json(json!({
            "response": {
                "errors": [{ "errno": errno, "message": message }]
            }
        })),
    )
        .into_response()
}

/// `{"error": ..., "error_description": ...}`
pub(crate) fn auth_error(status: StatusCode, error: &str, description: &str) -> Response {
    (
        status,
        Json(json!({ "error": error, "error_description": description })),
    )
        .into_response()
}

/// Move `key` out of a JSON object body, or `null` if absent.
pub(crate) fn take_key(body: &mut Value, key: &str) -> Value {
    body.get_mut(key).map(Value::take).unwrap_or_default()
}

/// Reject accounting requests whose bearer token the state does not accept.
pub(crate) fn check_accounting_auth(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    if state.is_authorized(bearer(headers)) {
        return None;
    }
    Some(accounting_error(
        StatusCode::UNAUTHORIZED,
        ERRNO_UNAUTHORIZED,
        "The server could not verify that you are authorized to access the URL requested.",
    ))
}
