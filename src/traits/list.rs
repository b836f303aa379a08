//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::error::{ApiResult, Result};
use crate::pagination::{ListParams, Page};

/// Default page size for `list_all`.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List entities with pagination support.
///
/// # Example
///
/// ```ignore
/// use freshbooks::{FreshBooksClient, List};
///
/// let client = FreshBooksClient::from_env()?;
///
/// // Fetch a single page
/// let page = client.invoices().list("zDmNq", &Default::default()).await?;
///
/// // Fetch all pages
/// let all_invoices = client.invoices().list_all("zDmNq").await?;
/// ```
#[async_trait]
pub trait List: Sync {
    /// The entity listed.
    type Model: Send;

    /// List one page of entities.
    ///
    /// # Errors
    ///
    /// The outer error is a transport or configuration failure; an error
    /// envelope from the API comes back as the inner `Err`.
    async fn list(&self, account_id: &str, params: &ListParams)
        -> Result<ApiResult<Page<Self::Model>>>;

    /// List every entity, following pagination until the last page.
    ///
    /// Stops at the first error; an API error on any page is returned as is.
    async fn list_all(&self, account_id: &str) -> Result<ApiResult<Vec<Self::Model>>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let params = ListParams::for_page(page, DEFAULT_PAGE_SIZE);
            let result = match self.list(account_id, &params).await? {
                Ok(result) => result,
                Err(error) => return Ok(Err(error)),
            };
            let has_more = result.pages.has_more();
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;

            // Safety limit to prevent infinite loops
            if page > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(Ok(all_items))
    }
}
