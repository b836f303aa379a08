//! Journal entry operations.

use async_trait::async_trait;

use crate::client::FreshBooksClient;
use crate::error::{ApiResult, Result};
use crate::models::JournalEntry;
use crate::traits::Create;

/// Journal entries of an account. The API only supports creating them.
///
/// Obtained from [`FreshBooksClient::journal_entries`].
#[derive(Debug, Clone, Copy)]
pub struct JournalEntries<'a> {
    client: &'a FreshBooksClient,
}

impl<'a> JournalEntries<'a> {
    pub(crate) fn new(client: &'a FreshBooksClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Create for JournalEntries<'_> {
    type Model = JournalEntry;

    #[tracing::instrument(skip(self, entry))]
    async fn create(&self, account_id: &str, entry: &JournalEntry) -> Result<ApiResult<JournalEntry>> {
        super::create(self.client, account_id, entry).await
    }
}
