//! E2E tests using the mock FreshBooks server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use chrono::NaiveDate;
use freshbooks::mock_server::{Fixtures, MockServer, MockState, DEFAULT_ACCOUNT_ID};
use freshbooks::{
    ClientOptions, Create, Delete, Detail, FreshBooksClient, FreshBooksError, Get, Invoice,
    JournalEntry, Line, List, ListParams, Money, Update, VisState,
};

fn bearer_client(server: &MockServer, token: &str) -> FreshBooksClient {
    FreshBooksClient::new(
        "client-id",
        ClientOptions::default()
            .with_api_url(server.url())
            .with_access_token(token),
    )
    .unwrap()
}

fn oauth_client(server: &MockServer) -> FreshBooksClient {
    FreshBooksClient::new(
        "client-id",
        ClientOptions::default()
            .with_api_url(server.url())
            .with_client_secret("client-secret")
            .with_redirect_uri("https://example.com/callback"),
    )
    .unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let client = bearer_client(&server, "test-token");

    server.shutdown().await;

    // After shutdown, the transport fails and nothing is retried
    let error = client.users().me().await.unwrap_err();
    assert!(matches!(error, FreshBooksError::HttpError(_)));
}

// =============================================================================
// OAuth Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_authorize_then_call_api() {
    let state = MockState::new()
        .with_client_secret("client-secret")
        .with_authorization_code("auth-code")
        .with_identity(Fixtures::identity(1, "owner@example.com", DEFAULT_ACCOUNT_ID))
        .with_required_token("not-issued-yet");
    let server = MockServer::with_state(state).await;
    let client = oauth_client(&server);

    // Step 1: no token yet, nothing is sent
    let error = client.users().me().await.unwrap_err();
    assert!(matches!(error, FreshBooksError::ConfigMissing("access_token")));

    // Step 2: exchange the code
    let token = client.get_access_token("auth-code").await.unwrap().unwrap();
    assert_eq!(token.access_token, "mock-access-1");
    assert_eq!(
        (token.access_token_expires_at - token.created_at).num_seconds(),
        43_200
    );

    // Step 3: the stored token is used
    let identity = client.users().me().await.unwrap().unwrap();
    assert_eq!(identity.email.as_deref(), Some("owner@example.com"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let state = MockState::new()
        .with_authorization_code("auth-code")
        .with_identity(Fixtures::identity(1, "owner@example.com", DEFAULT_ACCOUNT_ID));
    let server = MockServer::with_state(state).await;
    let client = oauth_client(&server);
    let clone = client.clone();

    client.get_access_token("auth-code").await.unwrap().unwrap();
    let first = client.access_token();

    let refreshed = clone.refresh_access_token(None).await.unwrap().unwrap();
    assert_ne!(Some(refreshed.access_token.clone()), first);
    assert_eq!(client.access_token(), Some(refreshed.access_token));

    // The old token no longer works; the shared new one does
    let stale = bearer_client(&server, first.as_deref().unwrap());
    let error = stale.users().me().await.unwrap().unwrap_err();
    assert_eq!(error.code, "unauthenticated");
    assert!(client.users().me().await.unwrap().is_ok());

    server.shutdown().await;
}

#[tokio::test]
async fn test_code_cannot_be_reused() {
    let state = MockState::new().with_authorization_code("auth-code");
    let server = MockServer::with_state(state).await;
    let client = oauth_client(&server);

    client.get_access_token("auth-code").await.unwrap().unwrap();
    let error = client.get_access_token("auth-code").await.unwrap().unwrap_err();

    assert_eq!(error.code, "invalid_grant");
    assert_eq!(error.status, Some(401));

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_client_secret() {
    let state = MockState::new()
        .with_client_secret("expected")
        .with_authorization_code("auth-code");
    let server = MockServer::with_state(state).await;

    let error = oauth_client(&server)
        .get_access_token("auth-code")
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(error.code, "invalid_client");

    server.shutdown().await;
}

// =============================================================================
// Invoice Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_and_get_invoice_workflow() {
    let server = MockServer::start().await;
    let client = bearer_client(&server, "test-token");

    // Step 1: List invoices
    let page = client
        .invoices()
        .list(DEFAULT_ACCOUNT_ID, &ListParams::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.pages.total, 3);
    assert!(!page.is_empty());

    // Step 2: Get the first one by id
    let first = &page.items[0];
    let invoice = client
        .invoices()
        .single(DEFAULT_ACCOUNT_ID, first.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(invoice, *first);

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_all_pages() {
    let mut state = MockState::new();
    for id in 1..=250 {
        state = state.with_invoice("big", Fixtures::sent_invoice(id, 1, "1.00"));
    }
    let server = MockServer::with_state(state).await;
    let client = bearer_client(&server, "test-token");

    let all = client.invoices().list_all("big").await.unwrap().unwrap();
    assert_eq!(all.len(), 250);

    // 100 per page: three requests
    assert_eq!(server.state().read().await.request_count, 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_update_delete_invoice() {
    let server = MockServer::start_empty().await;
    let client = bearer_client(&server, "test-token");

    // Step 1: Create
    let mut draft = Invoice::new(42, NaiveDate::from_ymd_opt(2021, 1, 15).unwrap());
    draft.currency_code = Some("USD".to_string());
    draft.lines = Some(vec![
        Line::new("Consulting", "3", Money::new("150.00", "USD")),
        Line::new("Travel", "1", Money::new("80.25", "USD")),
    ]);
    let created = client
        .invoices()
        .create("acct", &draft)
        .await
        .unwrap()
        .unwrap();
    let id = created.id.expect("server assigns an id");
    assert_eq!(created.amount, Some(Money::new("530.25", "USD")));
    assert!(created.is_outstanding());

    // Step 2: Update
    let mut changes = created.clone();
    changes.notes = Some("Thanks for your business".to_string());
    changes.po_number = Some(None);
    let updated = client
        .invoices()
        .update("acct", id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.notes.as_deref(), Some("Thanks for your business"));
    assert_eq!(updated.amount, created.amount);

    // Step 3: Soft delete
    let deleted = client.invoices().delete("acct", id).await.unwrap().unwrap();
    assert_eq!(deleted.vis_state, Some(VisState::Deleted));

    // Deleted invoices drop out of the list but can still be fetched
    let page = client
        .invoices()
        .list("acct", &ListParams::default())
        .await
        .unwrap()
        .unwrap();
    assert!(page.is_empty());
    let fetched = client.invoices().single("acct", id).await.unwrap().unwrap();
    assert!(fetched.is_deleted());

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_invoice_is_api_error() {
    let server = MockServer::start().await;
    let client = bearer_client(&server, "test-token");

    let error = client
        .invoices()
        .update(DEFAULT_ACCOUNT_ID, 1, &Invoice::default())
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(error.name.as_deref(), Some("Update Invoice"));
    assert_eq!(error.code, "1012");

    server.shutdown().await;
}

// =============================================================================
// Journal Entry Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_journal_entry_must_balance() {
    let server = MockServer::start_empty().await;
    let client = bearer_client(&server, "test-token");

    let mut entry = JournalEntry {
        name: "Owner draw".to_string(),
        description: "Monthly draw".to_string(),
        currency_code: "USD".to_string(),
        details: vec![Detail::debit(1, Money::new("500.00", "USD"))],
        ..Default::default()
    };

    let error = client
        .journal_entries()
        .create("acct", &entry)
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(error.code, "2001");

    entry.details.push(Detail::credit(2, Money::new("500.00", "USD")));
    let created = client
        .journal_entries()
        .create("acct", &entry)
        .await
        .unwrap()
        .unwrap();
    assert!(created.id.is_some());

    server.shutdown().await;
}

// =============================================================================
// Failure Tests
// =============================================================================

#[tokio::test]
async fn test_single_failure_is_retried() {
    let state = MockState::new()
        .with_identity(Fixtures::identity(1, "owner@example.com", DEFAULT_ACCOUNT_ID))
        .with_failure(500);
    let server = MockServer::with_state(state).await;
    let client = bearer_client(&server, "test-token");

    let identity = client.users().me().await.unwrap();
    assert!(identity.is_ok());
    assert_eq!(server.state().read().await.request_count, 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_repeated_failures_surface() {
    let state = MockState::new().with_failure(429).with_failure(429);
    let server = MockServer::with_state(state).await;
    let client = bearer_client(&server, "test-token");

    let error = client
        .invoices()
        .list(DEFAULT_ACCOUNT_ID, &ListParams::default())
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        FreshBooksError::UnexpectedResponse { status: 429, .. }
    ));

    server.shutdown().await;
}
