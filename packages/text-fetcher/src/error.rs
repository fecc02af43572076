//! Typed errors for the text fetcher.

use thiserror::Error;

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Only http and https are fetched
    #[error("unsupported URL scheme '{scheme}': {url}")]
    UnsupportedScheme { url: String, scheme: String },

    /// Request did not complete within the configured timeout
    #[error("request timed out: {url}")]
    Timeout { url: String },

    /// Server answered with something other than 200 or a followable redirect
    #[error("HTTP {status} {message}")]
    Status { status: u16, message: String },

    /// Redirect chain longer than the configured maximum
    #[error("too many redirects (max {max}) starting at {url}")]
    TooManyRedirects { url: String, max: usize },

    /// Connection, DNS or mid-transfer failure
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Classify a transport error, separating timeouts from other failures.
    pub(crate) fn from_transport(error: reqwest::Error, url: &str) -> Self {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Network(error)
        }
    }

    /// HTTP status code, when the failure came from the server's response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}
