//! Mock FreshBooks API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! FreshBooks accounting and auth services for integration and end-to-end
//! testing. Unlike wiremock which mocks at the HTTP level per-test, this
//! server maintains state across requests: invoices created through it can be
//! fetched, updated and deleted, and tokens it issues are the only ones it
//! accepts afterwards.
//!
//! # Example
//!
//! ```ignore
//! use freshbooks::mock_server::{MockServer, DEFAULT_ACCOUNT_ID};
//! use freshbooks::{ClientOptions, FreshBooksClient, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = FreshBooksClient::new(
//!         "client-id",
//!         ClientOptions::default()
//!             .with_api_url(server.url())
//!             .with_access_token("test-token"),
//!     )
//!     .unwrap();
//!
//!     // Server comes with default fixtures
//!     let invoice = client.invoices().single(DEFAULT_ACCOUNT_ID, 987654).await.unwrap().unwrap();
//!     assert_eq!(invoice.customer_id, Some(12345));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, DEFAULT_ACCOUNT_ID};
pub use server::MockServer;
pub use state::{Grant, IssuedToken, MockState};
