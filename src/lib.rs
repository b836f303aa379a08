//! FreshBooks API client library.
//!
//! A Rust library for the FreshBooks accounting API: OAuth token exchange,
//! authenticated requests with a bounded retry, pagination, and typed models
//! for the wire JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use freshbooks::{ClientOptions, FreshBooksClient, List};
//!
//! #[tokio::main]
//! async fn main() -> freshbooks::Result<()> {
//!     let client = FreshBooksClient::new(
//!         "your-client-id",
//!         ClientOptions::default().with_access_token("your-access-token"),
//!     )?;
//!
//!     match client.users().me().await? {
//!         Ok(identity) => println!("Signed in as {:?}", identity.email),
//!         Err(error) => eprintln!("FreshBooks said no: {error}"),
//!     }
//!
//!     let page = client.invoices().list("zDmNq", &Default::default()).await?;
//!     if let Ok(page) = page {
//!         println!("{} of {} invoices", page.len(), page.pages.total);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Operations return `Result<ApiResult<T>>`. The outer [`Result`] carries
//! failures that stop the call: missing configuration (raised before any
//! request), transport errors and bodies that cannot be understood. The inner
//! [`ApiResult`] carries the error envelopes FreshBooks sends back, as plain
//! [`ApiError`] values that can be matched on.
//!
//! # Retries
//!
//! A request answered with 429 or a 5xx status is sent again, immediately,
//! up to [`ClientOptions::max_retries`] times (once by default).
//!
//! # Configuration
//!
//! [`FreshBooksClient::from_env`] reads:
//!
//! - `FRESHBOOKS_CLIENT_ID` (required) - OAuth client id
//! - `FRESHBOOKS_CLIENT_SECRET` (optional) - needed for token exchange
//! - `FRESHBOOKS_REDIRECT_URI` (optional) - needed for the OAuth flow
//! - `FRESHBOOKS_ACCESS_TOKEN` (optional) - an existing access token
//! - `FRESHBOOKS_API_URL` (optional) - defaults to `https://api.freshbooks.com`
#![recursion_limit = "256"]

mod auth;
mod client;
mod config;
mod error;
pub mod models;
mod pagination;
mod resources;
mod traits;
mod transform;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::AccessToken;
pub use client::{FreshBooksClient, RawResponse};
pub use config::{ClientOptions, DEFAULT_API_URL, DEFAULT_AUTH_URL};
pub use error::{ApiError, ApiResult, ErrorDetail, ErrorSurface, FreshBooksError, Result};
pub use pagination::{ListParams, Page, Pagination};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Resource, Update};

// Re-export resource clients
pub use resources::{Invoices, JournalEntries, Users};

// Re-export models
pub use models::{
    AutoBillStatus, Business, BusinessMembership, DepositStatus, Detail, DisplayStatus, Identity,
    Invoice, InvoiceStatus, InvoiceV3Status, JournalEntry, Line, Money, PaymentStatus, VisState,
};
