//! Client configuration.

use std::time::Duration;

/// Default base URL of the FreshBooks API.
pub const DEFAULT_API_URL: &str = "https://api.freshbooks.com";

/// Default authorization page users are sent to.
pub const DEFAULT_AUTH_URL: &str = "https://auth.freshbooks.com/oauth/authorize";

/// Default number of re-issues after a 429 or 5xx response.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Options for [`FreshBooksClient::new`](crate::FreshBooksClient::new).
///
/// Everything is optional up front; operations that need a value check for it
/// and fail with [`FreshBooksError::ConfigMissing`](crate::FreshBooksError::ConfigMissing)
/// before sending anything.
///
/// # Example
///
/// ```
/// use freshbooks::ClientOptions;
///
/// let options = ClientOptions::default()
///     .with_client_secret("secret")
///     .with_redirect_uri("https://example.com/callback");
/// assert_eq!(options.max_retries, 1);
/// ```
#[derive(Clone)]
pub struct ClientOptions {
    /// OAuth client secret, needed for token exchange.
    pub client_secret: Option<String>,
    /// OAuth redirect URI registered for the application.
    pub redirect_uri: Option<String>,
    /// A previously obtained access token.
    pub access_token: Option<String>,
    /// A previously obtained refresh token.
    pub refresh_token: Option<String>,
    /// Base URL for API calls.
    pub api_url: String,
    /// Authorization page URL.
    pub auth_url: String,
    /// Overrides the default `freshbooks/<version>` user agent.
    pub user_agent: Option<String>,
    /// How many times a 429 or 5xx response is retried.
    pub max_retries: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            client_secret: None,
            redirect_uri: None,
            access_token: None,
            refresh_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            user_agent: None,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("redirect_uri", &self.redirect_uri)
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .field("max_retries", &self.max_retries)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientOptions {
    #[must_use]
    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let options = ClientOptions::default()
            .with_client_secret("very-secret")
            .with_access_token("access-token");
        let debug = format!("{options:?}");
        assert!(debug.contains("api_url"));
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("access-token"));
    }
}
