//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::error::{ApiResult, Result};

/// Delete an entity.
///
/// FreshBooks soft-deletes accounting records, so the deleted entity is
/// returned with its visibility changed.
#[async_trait]
pub trait Delete: Sync {
    /// The entity returned.
    type Model: Send;

    /// The ID type for this entity.
    type Id: Send + 'static;

    /// Delete the entity by ID.
    ///
    /// # Errors
    ///
    /// The outer error is a transport or configuration failure; an error
    /// envelope from the API comes back as the inner `Err`.
    async fn delete(&self, account_id: &str, id: Self::Id) -> Result<ApiResult<Self::Model>>;
}
