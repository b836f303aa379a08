//! Resource clients.
//!
//! Each client borrows a [`FreshBooksClient`] and therefore always uses its
//! current credentials. The accounting helpers below are generic over
//! [`Resource`]; a resource client picks the operations its endpoint
//! supports.

mod invoices;
mod journal_entries;
mod users;

pub use invoices::Invoices;
pub use journal_entries::JournalEntries;
pub use users::Users;

use serde_json::{json, Map, Value};

use crate::client::FreshBooksClient;
use crate::error::{ApiResult, Result};
use crate::models::VisState;
use crate::pagination::{ListParams, Page};
use crate::traits::Resource;
use crate::transform;

/// `accounting/account/{account_id}/{path}[/{id}]`
fn accounting_path(account_id: &str, resource_path: &str, id: Option<i64>) -> String {
    let account_id = urlencoding::encode(account_id);
    match id {
        Some(id) => format!("accounting/account/{account_id}/{resource_path}/{id}"),
        None => format!("accounting/account/{account_id}/{resource_path}"),
    }
}

async fn list<R: Resource>(
    client: &FreshBooksClient,
    account_id: &str,
    params: &ListParams,
) -> Result<ApiResult<Page<R>>> {
    let path = accounting_path(account_id, R::PATH, None);
    let response = client.get(&path, &params.to_query()).await?;
    let result = transform::decode_list(response.status, &response.body, R::PLURAL)?;
    Ok(result.map_err(|e| e.with_name(format!("List {}", R::NAME_PLURAL))))
}

async fn single<R: Resource>(
    client: &FreshBooksClient,
    account_id: &str,
    id: i64,
) -> Result<ApiResult<R>> {
    let path = accounting_path(account_id, R::PATH, Some(id));
    let response = client.get(&path, &[]).await?;
    let result = transform::decode_single(response.status, &response.body, R::SINGULAR)?;
    Ok(result.map_err(|e| e.with_name(format!("Get {}", R::NAME))))
}

async fn create<R: Resource>(
    client: &FreshBooksClient,
    account_id: &str,
    model: &R,
) -> Result<ApiResult<R>> {
    let path = accounting_path(account_id, R::PATH, None);
    let response = client.post(&path, &model.to_request()?).await?;
    let result = transform::decode_single(response.status, &response.body, R::SINGULAR)?;
    Ok(result.map_err(|e| e.with_name(format!("Create {}", R::NAME))))
}

async fn update<R: Resource>(
    client: &FreshBooksClient,
    account_id: &str,
    id: i64,
    model: &R,
) -> Result<ApiResult<R>> {
    let path = accounting_path(account_id, R::PATH, Some(id));
    let response = client.put(&path, &model.to_request()?).await?;
    let result = transform::decode_single(response.status, &response.body, R::SINGULAR)?;
    Ok(result.map_err(|e| e.with_name(format!("Update {}", R::NAME))))
}

/// Soft delete: accounting records are hidden by setting `vis_state`.
async fn delete<R: Resource>(
    client: &FreshBooksClient,
    account_id: &str,
    id: i64,
) -> Result<ApiResult<R>> {
    let path = accounting_path(account_id, R::PATH, Some(id));
    let mut body = Map::new();
    body.insert(
        R::SINGULAR.to_string(),
        json!({ "vis_state": i64::from(VisState::Deleted) }),
    );
    let body = Value::Object(body);
    let response = client.put(&path, &body).await?;
    let result = transform::decode_single(response.status, &response.body, R::SINGULAR)?;
    Ok(result.map_err(|e| e.with_name(format!("Delete {}", R::NAME))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounting_path() {
        assert_eq!(
            accounting_path("zDmNq", "invoices/invoices", None),
            "accounting/account/zDmNq/invoices/invoices"
        );
        assert_eq!(
            accounting_path("zDmNq", "invoices/invoices", Some(1)),
            "accounting/account/zDmNq/invoices/invoices/1"
        );
    }

    #[test]
    fn test_account_id_is_encoded() {
        assert_eq!(
            accounting_path("a/b", "invoices/invoices", None),
            "accounting/account/a%2Fb/invoices/invoices"
        );
    }
}
