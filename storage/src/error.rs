//! Storage errors.

use thiserror::Error;

/// Storage inspector failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A storage area could not be rendered as JSON.
    #[error("Failed to serialize storage: {0}")]
    Serialization(#[from] serde_json::Error),
}
