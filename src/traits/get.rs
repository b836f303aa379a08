//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::error::{ApiResult, Result};

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use freshbooks::{FreshBooksClient, Get};
///
/// let client = FreshBooksClient::from_env()?;
/// let invoice = client.invoices().single("zDmNq", 987654).await?;
/// ```
#[async_trait]
pub trait Get: Sync {
    /// The entity returned.
    type Model: Send;

    /// The ID type for this entity.
    type Id: Send + 'static;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// The outer error is a transport or configuration failure; an error
    /// envelope from the API comes back as the inner `Err`.
    async fn single(&self, account_id: &str, id: Self::Id) -> Result<ApiResult<Self::Model>>;
}
