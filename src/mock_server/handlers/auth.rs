//! Auth service handlers: the token endpoint and the current user.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use super::{auth_error, bearer};
use crate::mock_server::state::{Grant, MockState};

/// Lifetime of issued access tokens, in seconds.
pub const TOKEN_EXPIRES_IN: i64 = 43_200;

/// Body of a token request. `client_id` and `redirect_uri` are not checked.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_secret: Option<String>,
    pub code: Option<String>,
    pub refresh_token: Option<String>,
}

/// POST /auth/oauth/token
pub async fn token(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(request): Json<TokenRequest>,
) -> Response {
    let mut state = state.write().await;

    if let Some(expected) = &state.client_secret {
        if request.client_secret.as_deref() != Some(expected.as_str()) {
            return auth_error(
                StatusCode::UNAUTHORIZED,
                "invalid_client",
                "Client authentication failed due to unknown client, no client authentication included, or unsupported authentication method.",
            );
        }
    }

    let grant = match (request.grant_type.as_str(), request.code, request.refresh_token) {
        ("authorization_code", Some(code), _) => Grant::AuthorizationCode(code),
        ("refresh_token", _, Some(token)) => Grant::RefreshToken(token),
        (grant_type, _, _) => {
            return auth_error(
                StatusCode::BAD_REQUEST,
                "unsupported_grant_type",
                &format!("The authorization grant type `{grant_type}` is not supported."),
            )
        }
    };

    let Some(issued) = state.exchange(&grant) else {
        return auth_error(
            StatusCode::UNAUTHORIZED,
            "invalid_grant",
            "The provided authorization grant is invalid, expired, revoked, does not match the redirection URI used in the authorization request, or was issued to another client.",
        );
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": issued.access_token,
            "token_type": "Bearer",
            "expires_in": TOKEN_EXPIRES_IN,
            "refresh_token": issued.refresh_token,
            "scope": "user:profile:read user:invoices:read user:invoices:write",
            "created_at": state.token_created_at,
        })),
    )
        .into_response()
}

/// GET /auth/api/v1/users/me
pub async fn users_me(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if !state.is_authorized(bearer(&headers)) {
        return auth_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "This action requires authentication to continue.",
        );
    }

    match &state.identity {
        Some(identity) => (StatusCode::OK, Json(json!({ "response": identity }))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error_type": "not_found",
                "message": "No identity is associated with this token.",
            })),
        )
            .into_response(),
    }
}
