//! Token exchange tests.
//!
//! Uses wiremock to stand in for the FreshBooks auth service.

use freshbooks::{ClientOptions, ErrorSurface, FreshBooksClient, FreshBooksError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> FreshBooksClient {
    FreshBooksClient::new(
        "client-id",
        ClientOptions::default()
            .with_api_url(server.uri())
            .with_client_secret("client-secret")
            .with_redirect_uri("https://example.com/callback"),
    )
    .unwrap()
}

fn token_body(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "token_type": "Bearer",
        "expires_in": 100,
        "refresh_token": refresh,
        "scope": "user:profile:read",
        "created_at": 300
    })
}

#[tokio::test]
async fn test_get_access_token_stores_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/token"))
        .and(body_partial_json(json!({
            "grant_type": "authorization_code",
            "client_id": "client-id",
            "client_secret": "client-secret",
            "code": "auth-code",
            "redirect_uri": "https://example.com/callback"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("new-access", "new-refresh")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let token = client.get_access_token("auth-code").await.unwrap().unwrap();

    assert_eq!(token.access_token, "new-access");
    assert_eq!(token.refresh_token, "new-refresh");
    assert_eq!(token.access_token_expires_at.timestamp_millis(), 400_000);

    assert_eq!(client.access_token().as_deref(), Some("new-access"));
    assert_eq!(client.refresh_token().as_deref(), Some("new-refresh"));
    assert_eq!(client.token(), Some(token));
}

#[tokio::test]
async fn test_token_request_is_unauthenticated() {
    let mock_server = MockServer::start().await;

    // An Authorization header would match this mock and fail the exchange.
    Mock::given(method("POST"))
        .and(path("/auth/oauth/token"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("a", "r")))
        .mount(&mock_server)
        .await;

    let client = FreshBooksClient::new(
        "client-id",
        ClientOptions::default()
            .with_api_url(mock_server.uri())
            .with_client_secret("client-secret")
            .with_redirect_uri("https://example.com/callback")
            .with_access_token("old-access"),
    )
    .unwrap();

    let token = client.get_access_token("auth-code").await.unwrap();
    assert!(token.is_ok());
}

#[tokio::test]
async fn test_refresh_uses_held_refresh_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/token"))
        .and(body_partial_json(json!({"grant_type": "authorization_code"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("first", "first-refresh")))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/oauth/token"))
        .and(body_partial_json(json!({
            "grant_type": "refresh_token",
            "refresh_token": "first-refresh"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("second", "second-refresh")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    client.get_access_token("auth-code").await.unwrap().unwrap();
    let refreshed = client.refresh_access_token(None).await.unwrap().unwrap();

    assert_eq!(refreshed.access_token, "second");
    assert_eq!(client.access_token().as_deref(), Some("second"));
    assert_eq!(client.refresh_token().as_deref(), Some("second-refresh"));
}

#[tokio::test]
async fn test_rejected_code_is_an_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "The provided authorization grant is invalid."
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let error = client.get_access_token("bad-code").await.unwrap().unwrap_err();

    assert_eq!(error.code, "invalid_grant");
    assert_eq!(error.message, "The provided authorization grant is invalid.");
    assert_eq!(error.surface, ErrorSurface::Auth);
    assert_eq!(error.status, Some(401));
    assert!(client.access_token().is_none());
}

#[tokio::test]
async fn test_missing_config_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("a", "r")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = FreshBooksClient::new(
        "client-id",
        ClientOptions::default()
            .with_api_url(mock_server.uri())
            .with_client_secret("client-secret"),
    )
    .unwrap();

    let error = client.get_access_token("auth-code").await.unwrap_err();
    assert!(matches!(error, FreshBooksError::ConfigMissing("redirect_uri")));
}
