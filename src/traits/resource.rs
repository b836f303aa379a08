//! Wire description of an accounting resource.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// An accounting resource living under `/accounting/account/{account_id}/`.
///
/// The serde attributes on the implementing type are its key mapping; the
/// constants locate it in URLs and envelopes.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Path below the account, e.g. `"invoices/invoices"`.
    const PATH: &'static str;

    /// Envelope key of a single item, e.g. `"invoice"`.
    const SINGULAR: &'static str;

    /// Envelope key of a list, e.g. `"invoices"`.
    const PLURAL: &'static str;

    /// Human name used in error labels, e.g. `"Invoice"`.
    const NAME: &'static str;

    /// Plural human name, e.g. `"Invoices"`.
    const NAME_PLURAL: &'static str;

    /// Build the request body `{<SINGULAR>: {...}}` without server-owned keys.
    fn to_request(&self) -> Result<Value>;
}
