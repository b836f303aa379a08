//! User operations on the auth service.

use crate::client::FreshBooksClient;
use crate::error::{ApiResult, Result};
use crate::models::Identity;
use crate::transform;

const ME_PATH: &str = "auth/api/v1/users/me";

/// Obtained from [`FreshBooksClient::users`].
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a FreshBooksClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a FreshBooksClient) -> Self {
        Self { client }
    }

    /// The identity that owns the current access token.
    ///
    /// # Errors
    ///
    /// The outer error is a transport or configuration failure; an error
    /// envelope from the auth service comes back as the inner `Err`.
    #[tracing::instrument(skip(self))]
    pub async fn me(&self) -> Result<ApiResult<Identity>> {
        let response = self.client.get(ME_PATH, &[]).await?;
        transform::decode_response(response.status, &response.body)
    }
}
