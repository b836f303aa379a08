//! OAuth token handling.
//!
//! FreshBooks uses the authorization code grant. The user is sent to
//! [`FreshBooksClient::get_auth_request_url`]; the code they come back with
//! is exchanged by [`FreshBooksClient::get_access_token`]. Both check the
//! configuration they need before doing anything else.

use chrono::{DateTime, Duration, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::client::FreshBooksClient;
use crate::error::{ApiResult, FreshBooksError, Result};
use crate::transform;

const TOKEN_PATH: &str = "auth/oauth/token";

/// Body of a successful token exchange.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: i64,
    refresh_token: String,
    #[serde(default)]
    scope: String,
    /// Seconds since the Unix epoch.
    created_at: i64,
}

/// The credentials obtained from a token exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Space separated scopes granted to the token.
    pub scope: String,
    /// When the server issued the token.
    pub created_at: DateTime<Utc>,
    /// `created_at` plus the token lifetime.
    pub access_token_expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("created_at", &self.created_at)
            .field("access_token_expires_at", &self.access_token_expires_at)
            .finish_non_exhaustive()
    }
}

impl AccessToken {
    fn from_response(response: TokenResponse) -> Result<Self> {
        let created_at = DateTime::<Utc>::from_timestamp(response.created_at, 0).ok_or_else(|| {
            serde_json::Error::custom(format!("created_at out of range: {}", response.created_at))
        })?;
        let access_token_expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| created_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                serde_json::Error::custom(format!("expires_in out of range: {}", response.expires_in))
            })?;

        Ok(Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type,
            scope: response.scope,
            created_at,
            access_token_expires_at,
        })
    }

    /// Granted scopes as a list.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope.split_whitespace().collect()
    }

    /// Whether the access token has expired.
    pub fn is_expired(&self) -> bool {
        self.access_token_expires_at <= Utc::now()
    }

    /// Whether the access token expires within `threshold`.
    pub fn expires_within(&self, threshold: Duration) -> bool {
        self.access_token_expires_at <= Utc::now() + threshold
    }
}

impl FreshBooksClient {
    /// Build the URL to send a user to for authorization.
    ///
    /// # Errors
    ///
    /// Fails with [`FreshBooksError::ConfigMissing`] naming `redirect_uri` if
    /// no redirect URI is configured.
    pub fn get_auth_request_url(&self, scopes: &[&str]) -> Result<Url> {
        self.auth_request_url(scopes, None)
    }

    /// Like [`get_auth_request_url`](Self::get_auth_request_url), with a
    /// `state` value echoed back on the redirect.
    pub fn get_auth_request_url_with_state(&self, scopes: &[&str], state: &str) -> Result<Url> {
        self.auth_request_url(scopes, Some(state))
    }

    fn auth_request_url(&self, scopes: &[&str], state: Option<&str>) -> Result<Url> {
        let redirect_uri = self
            .options()
            .redirect_uri
            .as_deref()
            .ok_or(FreshBooksError::ConfigMissing("redirect_uri"))?;

        let mut url = Url::parse(&self.options().auth_url)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", self.client_id())
                .append_pair("response_type", "code")
                .append_pair("redirect_uri", redirect_uri);
            if !scopes.is_empty() {
                query.append_pair("scope", &scopes.join(" "));
            }
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url)
    }

    /// Exchange an authorization code for an access token.
    ///
    /// On success the token is installed on this client (and its clones) and
    /// returned.
    ///
    /// # Errors
    ///
    /// Fails with [`FreshBooksError::ConfigMissing`] before any request if
    /// `client_secret` or `redirect_uri` is missing. A rejected code comes
    /// back as the inner `Err`.
    #[tracing::instrument(skip(self, code))]
    pub async fn get_access_token(&self, code: &str) -> Result<ApiResult<AccessToken>> {
        let (client_secret, redirect_uri) = self.exchange_config()?;
        let body = json!({
            "grant_type": "authorization_code",
            "client_id": self.client_id(),
            "client_secret": client_secret,
            "code": code,
            "redirect_uri": redirect_uri,
        });
        self.exchange(&body).await
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Uses `refresh_token` if given, otherwise the one this client holds.
    ///
    /// # Errors
    ///
    /// Fails with [`FreshBooksError::ConfigMissing`] before any request if
    /// `client_secret`, `redirect_uri` or a refresh token is missing.
    #[tracing::instrument(skip(self, refresh_token))]
    pub async fn refresh_access_token(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<ApiResult<AccessToken>> {
        let (client_secret, redirect_uri) = self.exchange_config()?;
        let refresh_token = match refresh_token {
            Some(token) => token.to_string(),
            None => self
                .refresh_token()
                .ok_or(FreshBooksError::ConfigMissing("refresh_token"))?,
        };
        let body = json!({
            "grant_type": "refresh_token",
            "client_id": self.client_id(),
            "client_secret": client_secret,
            "refresh_token": refresh_token,
            "redirect_uri": redirect_uri,
        });
        self.exchange(&body).await
    }

    fn exchange_config(&self) -> Result<(&str, &str)> {
        let client_secret = self
            .options()
            .client_secret
            .as_deref()
            .ok_or(FreshBooksError::ConfigMissing("client_secret"))?;
        let redirect_uri = self
            .options()
            .redirect_uri
            .as_deref()
            .ok_or(FreshBooksError::ConfigMissing("redirect_uri"))?;
        Ok((client_secret, redirect_uri))
    }

    async fn exchange(&self, body: &serde_json::Value) -> Result<ApiResult<AccessToken>> {
        let response = self.post_unauthenticated(TOKEN_PATH, body).await?;
        let token = match transform::decode_bare::<TokenResponse>(response.status, &response.body)? {
            Ok(token) => AccessToken::from_response(token)?,
            Err(error) => return Ok(Err(error)),
        };

        tracing::debug!(
            expires_at = %token.access_token_expires_at,
            scope = %token.scope,
            "Obtained access token"
        );
        self.store_token(token.clone());
        Ok(Ok(token))
    }
}
