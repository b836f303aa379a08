//! Invoice endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::{
    accounting_error, accounting_result, check_accounting_auth, take_key, ERRNO_INVALID_FIELD,
    ERRNO_NOT_FOUND,
};
use crate::mock_server::state::MockState;
use crate::Invoice;

const DEFAULT_PER_PAGE: usize = 15;
const MAX_PER_PAGE: usize = 100;

/// Page and size from the raw query pairs; repeated `include[]` keys are
/// accepted and ignored.
fn page_params(query: &[(String, String)]) -> (usize, usize) {
    let lookup = |name: &str| {
        query
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.parse::<usize>().ok())
    };
    let page = lookup("page").unwrap_or(1).max(1);
    let per_page = lookup("per_page")
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    (page, per_page)
}

fn not_found(id: i64) -> Response {
    accounting_error(
        StatusCode::NOT_FOUND,
        ERRNO_NOT_FOUND,
        &format!("Invoice not found. ({id})"),
    )
}

/// GET /accounting/account/{account_id}/invoices/invoices
pub async fn list_invoices(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(account_id): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Some(rejection) = check_accounting_auth(&state, &headers) {
        return rejection;
    }

    let (page, per_page) = page_params(&query);
    let visible: Vec<&Invoice> = state
        .list_invoices(&account_id)
        .into_iter()
        .filter(|invoice| !invoice.is_deleted())
        .collect();
    let total = visible.len();
    let pages = total.div_ceil(per_page);

    let start = (page - 1) * per_page;
    let invoices: Vec<&Invoice> = visible.into_iter().skip(start).take(per_page).collect();

    accounting_result(
        StatusCode::OK,
        json!({
            "invoices": invoices,
            "page": page,
            "pages": pages,
            "per_page": per_page,
            "total": total,
        }),
    )
}

/// GET /accounting/account/{account_id}/invoices/invoices/{id}
pub async fn get_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((account_id, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Some(rejection) = check_accounting_auth(&state, &headers) {
        return rejection;
    }

    match state.get_invoice(&account_id, id) {
        Some(invoice) => accounting_result(StatusCode::OK, json!({ "invoice": invoice })),
        None => not_found(id),
    }
}

/// POST /accounting/account/{account_id}/invoices/invoices
pub async fn create_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = check_accounting_auth(&state, &headers) {
        return rejection;
    }

    let invoice: Invoice = match serde_json::from_value(take_key(&mut body, "invoice")) {
        Ok(invoice) => invoice,
        Err(e) => {
            return accounting_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                ERRNO_INVALID_FIELD,
                &format!("Invalid invoice: {e}"),
            )
        }
    };

    let created = state.create_invoice(&account_id, invoice);
    accounting_result(StatusCode::OK, json!({ "invoice": created }))
}

/// PUT /accounting/account/{account_id}/invoices/invoices/{id}
///
/// Keys in the request replace the stored ones; everything else is kept.
/// Deletion is an update of `vis_state` to 1.
pub async fn update_invoice(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((account_id, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = check_accounting_auth(&state, &headers) {
        return rejection;
    }

    let Some(existing) = state.get_invoice(&account_id, id) else {
        return not_found(id);
    };
    let Value::Object(changes) = take_key(&mut body, "invoice") else {
        return accounting_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            ERRNO_INVALID_FIELD,
            "Expected an invoice object.",
        );
    };

    let mut merged = match serde_json::to_value(existing) {
        Ok(value) => value,
        Err(e) => {
            return accounting_error(StatusCode::INTERNAL_SERVER_ERROR, ERRNO_INVALID_FIELD, &e.to_string())
        }
    };
    if let Value::Object(fields) = &mut merged {
        fields.extend(changes);
    }

    let updated: Invoice = match serde_json::from_value(merged) {
        Ok(invoice) => invoice,
        Err(e) => {
            return accounting_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                ERRNO_INVALID_FIELD,
                &format!("Invalid invoice: {e}"),
            )
        }
    };

    let response = accounting_result(StatusCode::OK, json!({ "invoice": &updated }));
    state
        .invoices
        .entry(account_id)
        .or_default()
        .insert(id, updated);
    response
}
