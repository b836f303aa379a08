//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::error::{ApiResult, Result};

/// Update an existing entity.
///
/// Only the fields that are set on the model are sent.
///
/// # Example
///
/// ```ignore
/// use freshbooks::{FreshBooksClient, Invoice, Update};
///
/// let client = FreshBooksClient::from_env()?;
/// let changes = Invoice {
///     notes: Some("Thanks!".to_string()),
///     ..Default::default()
/// };
/// let updated = client.invoices().update("zDmNq", 987654, &changes).await?;
/// ```
#[async_trait]
pub trait Update: Sync {
    /// The entity sent and returned.
    type Model: Send + Sync;

    /// The ID type for this entity.
    type Id: Send + 'static;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// The outer error is a transport or configuration failure; an error
    /// envelope from the API comes back as the inner `Err`.
    async fn update(
        &self,
        account_id: &str,
        id: Self::Id,
        model: &Self::Model,
    ) -> Result<ApiResult<Self::Model>>;
}
