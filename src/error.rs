//! Error types for gitlab-mr-resource

use crate::platform::Operation;
use thiserror::Error;

/// Errors raised while running the out step
///
/// Every variant is terminal: the binary reports it and exits non-zero
/// without writing a response.
#[derive(Error, Debug)]
pub enum Error {
    /// The request on stdin could not be decoded or is inconsistent
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The `source` block cannot be turned into a usable API configuration
    #[error("invalid source configuration: {0}")]
    Config(String),

    /// The merge request snapshot could not be read or parsed
    #[error("merge request snapshot: {0}")]
    Snapshot(String),

    /// The comment file could not be read
    #[error("comment file: {0}")]
    CommentFile(String),

    /// The API answered with a status code other than the expected one
    #[error("{operation} failed: {status}, response {body}")]
    UnexpectedStatus {
        /// Remote call that failed
        operation: Operation,
        /// HTTP status code received
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The request never got a response
    #[error("{operation} failed: {source}")]
    Transport {
        /// Remote call that failed
        operation: Operation,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gitlab-mr-resource
pub type Result<T> = std::result::Result<T, Error>;
