//! Typed errors for record repair.
//!
//! The repair run itself never returns an error; these types describe what
//! went wrong underneath so it can be logged.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading or saving the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Top-level JSON value is not an object
    #[error("record store must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// Store could not be serialized
    #[error("failed to serialize record store: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Store could not be written back
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors talking to the chat platform.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Transport failure (connection, DNS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Platform answered with a non-success status other than 404.
    /// `message` is the response body, empty if it could not be read.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Channel or message id is not a platform id (ASCII digits only)
    #[error("invalid id {id:?}")]
    InvalidId { id: String },

    /// Response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub type ChatResult<T> = std::result::Result<T, ChatError>;
