//! Mock FreshBooks API server.
//!
//! Provides an axum-based HTTP server that simulates the FreshBooks API.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock FreshBooks API server for testing.
///
/// The server runs in the background and can be used to test the FreshBooks
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock server stopped");
            }
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the `api_url` of a `FreshBooksClient` under test.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new().with_identity(scenario.identity);

        for invoice in scenario.invoices {
            state = state.with_invoice(&scenario.account_id, invoice);
        }

        state
    }

    /// Create the axum router with all routes.
    pub fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Invoice routes
            .route(
                "/accounting/account/:account_id/invoices/invoices",
                get(handlers::list_invoices).post(handlers::create_invoice),
            )
            .route(
                "/accounting/account/:account_id/invoices/invoices/:id",
                get(handlers::get_invoice).put(handlers::update_invoice),
            )
            // Journal entry routes
            .route(
                "/accounting/account/:account_id/journal_entries/journal_entries",
                post(handlers::create_journal_entry),
            )
            // Auth service routes
            .route("/auth/oauth/token", post(handlers::token))
            .route("/auth/api/v1/users/me", get(handlers::users_me))
            // Health check
            .route("/health", get(health_check))
            .layer(middleware::from_fn_with_state(state.clone(), inject_failures))
            .with_state(state)
    }
}

/// Count the request and answer it with a queued failure status, if any.
async fn inject_failures(
    State(state): State<Arc<RwLock<MockState>>>,
    request: Request,
    next: Next,
) -> Response {
    let injected = {
        let mut state = state.write().await;
        state.request_count += 1;
        state.injected_failures.pop_front()
    };

    match injected {
        Some(status) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, status.canonical_reason().unwrap_or("Injected failure")).into_response()
        }
        None => next.run(request).await,
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::mock_server::fixtures::DEFAULT_ACCOUNT_ID;
    use crate::{ClientOptions, FreshBooksClient, Get, List};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn client_for(server: &MockServer, token: &str) -> FreshBooksClient {
        FreshBooksClient::new(
            "client-id",
            ClientOptions::default()
                .with_api_url(server.url())
                .with_access_token(token),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_lists_invoices_in_envelope() {
        let app = MockServer::create_router(MockServer::default_state().shared());
        let uri = format!("/accounting/account/{DEFAULT_ACCOUNT_ID}/invoices/invoices?page=1&per_page=2");

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let result = &body["response"]["result"];
        assert_eq!(result["invoices"].as_array().unwrap().len(), 2);
        assert_eq!(result["page"], 1);
        assert_eq!(result["pages"], 2);
        assert_eq!(result["per_page"], 2);
        assert_eq!(result["total"], 3);
    }

    #[tokio::test]
    async fn test_router_rejects_wrong_token() {
        let state = MockState::new().with_required_token("right").shared();
        let app = MockServer::create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/accounting/account/abc/invoices/invoices")
                    .header("Authorization", "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["response"]["errors"][0]["errno"], 1003);
    }

    #[tokio::test]
    async fn test_injected_failure_answers_once() {
        let state = MockState::new().with_failure(503).shared();
        let app = MockServer::create_router(state.clone());

        let first = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::SERVICE_UNAVAILABLE);

        let second = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(state.read().await.request_count, 2);
    }

    #[tokio::test]
    async fn test_get_invoice_with_freshbooks_client() {
        let server = MockServer::start().await;
        let client = client_for(&server, "test-token");

        let invoice = client
            .invoices()
            .single(DEFAULT_ACCOUNT_ID, 987654)
            .await
            .expect("Failed to get invoice")
            .expect("Invoice was refused");

        assert_eq!(invoice.id, Some(987654));
        assert_eq!(invoice.customer_id, Some(12345));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = client_for(&server, "test-token");

        let error = client
            .invoices()
            .single(DEFAULT_ACCOUNT_ID, 1)
            .await
            .unwrap()
            .unwrap_err();

        assert_eq!(error.code, "1012");
        assert_eq!(error.status, Some(404));

        let page = client
            .invoices()
            .list(DEFAULT_ACCOUNT_ID, &Default::default())
            .await
            .unwrap()
            .unwrap();
        assert!(page.is_empty());

        server.shutdown().await;
    }
}
