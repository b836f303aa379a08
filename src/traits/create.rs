//! Create trait for adding entities.

use async_trait::async_trait;

use crate::error::{ApiResult, Result};

/// Create a new entity.
#[async_trait]
pub trait Create: Sync {
    /// The entity sent and returned.
    type Model: Send + Sync;

    /// Create the entity and return it as stored by the server.
    ///
    /// # Errors
    ///
    /// The outer error is a transport or configuration failure; an error
    /// envelope from the API comes back as the inner `Err`.
    async fn create(&self, account_id: &str, model: &Self::Model) -> Result<ApiResult<Self::Model>>;
}
