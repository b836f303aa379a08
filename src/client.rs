//! FreshBooks API client.
//!
//! [`FreshBooksClient`] owns the HTTP connection pool, the configuration and
//! the current credentials. Requests go through one retrying executor; the
//! resource clients ([`Invoices`], [`JournalEntries`], [`Users`]) borrow the
//! client and decode what it returns.

use std::env;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::auth::AccessToken;
use crate::config::{ClientOptions, DEFAULT_API_URL};
use crate::error::{FreshBooksError, Result};
use crate::resources::{Invoices, JournalEntries, Users};

const USER_AGENT: &str = concat!("freshbooks/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed request, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Credentials shared by a client and its clones.
///
/// Never mutated in place: a token exchange swaps in a new `Arc`, so a
/// request that already read the old one keeps using it.
#[derive(Debug, Default)]
struct Credentials {
    access_token: Option<String>,
    refresh_token: Option<String>,
    token: Option<AccessToken>,
}

/// FreshBooks API client.
///
/// Handles authentication, retries and HTTP requests. Resource operations
/// are reached through [`invoices`](Self::invoices),
/// [`journal_entries`](Self::journal_entries) and [`users`](Self::users).
///
/// Clones share the connection pool and the credentials, so a token obtained
/// through one clone is used by all of them. Clients built separately are
/// independent.
///
/// # Example
///
/// ```no_run
/// use freshbooks::{ClientOptions, FreshBooksClient};
///
/// # fn example() -> freshbooks::Result<()> {
/// // Create from environment variables
/// let client = FreshBooksClient::from_env()?;
///
/// // Or configure manually
/// let client = FreshBooksClient::new(
///     "your-client-id",
///     ClientOptions::default().with_access_token("your-access-token"),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FreshBooksClient {
    http: Client,
    client_id: String,
    options: Arc<ClientOptions>,
    api_url: Arc<Url>,
    credentials: Arc<RwLock<Arc<Credentials>>>,
}

impl std::fmt::Debug for FreshBooksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshBooksClient")
            .field("client_id", &self.client_id)
            .field("api_url", &self.api_url.as_str())
            .finish_non_exhaustive()
    }
}

impl FreshBooksClient {
    /// Create a client from environment variables.
    ///
    /// Reads `FRESHBOOKS_CLIENT_ID` (required), and optionally
    /// `FRESHBOOKS_CLIENT_SECRET`, `FRESHBOOKS_REDIRECT_URI`,
    /// `FRESHBOOKS_ACCESS_TOKEN` and `FRESHBOOKS_API_URL` (defaults to
    /// `https://api.freshbooks.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if `FRESHBOOKS_CLIENT_ID` is not set.
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("FRESHBOOKS_CLIENT_ID")
            .map_err(|_| FreshBooksError::ConfigMissing("FRESHBOOKS_CLIENT_ID"))?;

        let options = ClientOptions {
            client_secret: env::var("FRESHBOOKS_CLIENT_SECRET").ok(),
            redirect_uri: env::var("FRESHBOOKS_REDIRECT_URI").ok(),
            access_token: env::var("FRESHBOOKS_ACCESS_TOKEN").ok(),
            api_url: env::var("FRESHBOOKS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            ..Default::default()
        };

        Self::new(&client_id, options)
    }

    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(client_id: &str, options: ClientOptions) -> Result<Self> {
        // Ensure base URL ends with /
        let api_url_str = if options.api_url.ends_with('/') {
            options.api_url.clone()
        } else {
            format!("{}/", options.api_url)
        };

        let api_url = Url::parse(&api_url_str)?;

        let http = Client::builder()
            .user_agent(options.user_agent.as_deref().unwrap_or(USER_AGENT))
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(options.timeout)
            .build()
            .map_err(FreshBooksError::HttpError)?;

        let credentials = Credentials {
            access_token: options.access_token.clone(),
            refresh_token: options.refresh_token.clone(),
            token: None,
        };

        Ok(Self {
            http,
            client_id: client_id.to_string(),
            options: Arc::new(options),
            api_url: Arc::new(api_url),
            credentials: Arc::new(RwLock::new(Arc::new(credentials))),
        })
    }

    /// The OAuth client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The API base URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// The options the client was built with.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Invoice operations.
    pub fn invoices(&self) -> Invoices<'_> {
        Invoices::new(self)
    }

    /// Journal entry operations.
    pub fn journal_entries(&self) -> JournalEntries<'_> {
        JournalEntries::new(self)
    }

    /// User operations.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    fn current_credentials(&self) -> Arc<Credentials> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_credentials(&self, credentials: Credentials) {
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(credentials);
    }

    /// The bearer token sent with requests, if any.
    pub fn access_token(&self) -> Option<String> {
        self.current_credentials().access_token.clone()
    }

    /// The refresh token currently held, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.current_credentials().refresh_token.clone()
    }

    /// The token bundle from the last successful exchange.
    pub fn token(&self) -> Option<AccessToken> {
        self.current_credentials().token.clone()
    }

    /// Replace the bearer token, dropping any held bundle.
    pub fn set_access_token(&self, access_token: impl Into<String>) {
        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let refresh_token = credentials.refresh_token.clone();
        *credentials = Arc::new(Credentials {
            access_token: Some(access_token.into()),
            refresh_token,
            token: None,
        });
    }

    /// Install a freshly exchanged token bundle.
    pub(crate) fn store_token(&self, token: AccessToken) {
        self.replace_credentials(Credentials {
            access_token: Some(token.access_token.clone()),
            refresh_token: Some(token.refresh_token.clone()),
            token: Some(token),
        });
    }

    /// Make an authenticated GET request.
    #[tracing::instrument(skip(self, query))]
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        self.execute(Method::GET, path, query, None, true).await
    }

    /// Make an authenticated POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post(&self, path: &str, body: &Value) -> Result<RawResponse> {
        self.execute(Method::POST, path, &[], Some(body), true).await
    }

    /// Make an authenticated PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put(&self, path: &str, body: &Value) -> Result<RawResponse> {
        self.execute(Method::PUT, path, &[], Some(body), true).await
    }

    /// Make an unauthenticated POST request (token exchange).
    #[tracing::instrument(skip(self, body))]
    pub(crate) async fn post_unauthenticated(&self, path: &str, body: &Value) -> Result<RawResponse> {
        self.execute(Method::POST, path, &[], Some(body), false).await
    }

    /// Send a request, re-issuing it after 429 and 5xx responses up to
    /// `max_retries` times.
    ///
    /// Transport failures are returned at once and never retried.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        authenticated: bool,
    ) -> Result<RawResponse> {
        let url = self.api_url.join(path)?;

        let token = if authenticated {
            let token = self
                .access_token()
                .ok_or(FreshBooksError::ConfigMissing("access_token"))?;
            Some(token)
        } else {
            None
        };

        let mut attempt = 0;
        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json");

            if let Some(token) = &token {
                request = request.bearer_auth(token);
            }
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await.map_err(FreshBooksError::HttpError)?;
            let status = response.status();

            if is_retryable(status) && attempt < self.options.max_retries {
                attempt += 1;
                tracing::warn!(%status, attempt, "Retrying {} {}", method, path);
                continue;
            }

            let body = response.text().await.map_err(FreshBooksError::HttpError)?;
            return Ok(RawResponse { status, body });
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
