//! Error types for FreshBooks API operations.
//!
//! Two channels are kept apart. [`FreshBooksError`] is the
//! out-of-band failure channel (bad setup, transport faults, bodies that
//! cannot be understood). [`ApiError`] is a value: the server answered with a
//! well-formed error envelope and the caller gets it back inside an
//! [`ApiResult`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a FreshBooks operation.
#[derive(Debug, Error)]
pub enum FreshBooksError {
    /// A required client option is missing. Raised before any I/O.
    #[error("{0} must be configured")]
    ConfigMissing(&'static str),

    /// The server answered with a non-success status and a body that is not
    /// a recognized error envelope.
    #[error("Unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

/// Result type alias for FreshBooks operations.
pub type Result<T> = core::result::Result<T, FreshBooksError>;

/// Outcome of a request that reached the API: either the decoded resource or
/// the error envelope the server sent back.
pub type ApiResult<T> = core::result::Result<T, ApiError>;

/// Which error envelope an [`ApiError`] was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSurface {
    /// `{"response": {"errors": [{"errno", "message"}]}}`
    Accounting,
    /// `{"error", "error_description"}` or `{"error_type", "message"}`
    Auth,
}

/// A single entry of an accounting error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// The FreshBooks error number (`errno` on the wire).
    pub number: i64,
    pub message: String,
}

/// An error reported by the FreshBooks API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Operation label, e.g. `"List Invoices"`. Set for accounting calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Error code: the first `errno` for accounting errors, the `error` or
    /// `error_type` string for auth errors.
    pub code: String,

    /// Human readable message.
    pub message: String,

    /// Every sub-error of an accounting envelope, in server order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,

    /// HTTP status the error arrived with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    pub surface: ErrorSurface,
}

impl ApiError {
    /// Attach the operation label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// True if the error came from an accounting envelope.
    pub fn is_accounting(&self) -> bool {
        self.surface == ErrorSurface::Accounting
    }

    /// True if the server reported the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401) || self.code == "unauthenticated"
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}: {} ({})", self.message, self.code),
            None => write!(f, "{} ({})", self.message, self.code),
        }
    }
}

impl std::error::Error for ApiError {}
