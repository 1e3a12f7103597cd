//! Error types for directory requests.

use thiserror::Error;

/// Result type alias for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Directory request failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The request never got a response.
    #[error("Directory request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("Directory request to {url} failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected directory response: {0}")]
    Decode(String),

    /// No user with this id.
    #[error("User {0} not found")]
    NotFound(u64),

    /// The client could not be constructed.
    #[error("Directory client misconfigured: {0}")]
    Configuration(String),
}
