//! Invoice operations.

use async_trait::async_trait;

use crate::client::FreshBooksClient;
use crate::error::{ApiResult, Result};
use crate::models::Invoice;
use crate::pagination::{ListParams, Page};
use crate::traits::{Create, Delete, Get, List, Update};

/// Invoices of an account: `/accounting/account/{account_id}/invoices/invoices`.
///
/// Obtained from [`FreshBooksClient::invoices`].
#[derive(Debug, Clone, Copy)]
pub struct Invoices<'a> {
    client: &'a FreshBooksClient,
}

impl<'a> Invoices<'a> {
    pub(crate) fn new(client: &'a FreshBooksClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl List for Invoices<'_> {
    type Model = Invoice;

    #[tracing::instrument(skip(self))]
    async fn list(&self, account_id: &str, params: &ListParams) -> Result<ApiResult<Page<Invoice>>> {
        super::list(self.client, account_id, params).await
    }
}

#[async_trait]
impl Get for Invoices<'_> {
    type Model = Invoice;
    type Id = i64;

    #[tracing::instrument(skip(self))]
    async fn single(&self, account_id: &str, id: i64) -> Result<ApiResult<Invoice>> {
        super::single(self.client, account_id, id).await
    }
}

#[async_trait]
impl Create for Invoices<'_> {
    type Model = Invoice;

    #[tracing::instrument(skip(self, invoice))]
    async fn create(&self, account_id: &str, invoice: &Invoice) -> Result<ApiResult<Invoice>> {
        super::create(self.client, account_id, invoice).await
    }
}

#[async_trait]
impl Update for Invoices<'_> {
    type Model = Invoice;
    type Id = i64;

    #[tracing::instrument(skip(self, invoice))]
    async fn update(
        &self,
        account_id: &str,
        id: i64,
        invoice: &Invoice,
    ) -> Result<ApiResult<Invoice>> {
        super::update(self.client, account_id, id, invoice).await
    }
}

#[async_trait]
impl Delete for Invoices<'_> {
    type Model = Invoice;
    type Id = i64;

    #[tracing::instrument(skip(self))]
    async fn delete(&self, account_id: &str, id: i64) -> Result<ApiResult<Invoice>> {
        super::delete(self.client, account_id, id).await
    }
}
