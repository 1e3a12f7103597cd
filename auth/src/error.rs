//! Error types for the login exchange.

use crate::form::ValidationError;
use thiserror::Error;
use userdesk_runtime::StoreError;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Why the auth gateway could not produce a user.
///
/// The `Display` text is what ends up in [`AuthState::error`](crate::state::AuthState::error),
/// so every variant renders a message fit to show the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never got a response (DNS, connect, timeout, TLS).
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or a status description.
        message: String,
    },

    /// The success body was not a user record.
    #[error("Unexpected login response: {0}")]
    Decode(String),

    /// The gateway could not be constructed.
    #[error("Auth gateway misconfigured: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Build a rejection with the given status and message.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

/// Why [`AuthClient::login_and_wait`](crate::client::AuthClient::login_and_wait) returned early.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The credentials failed local validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected the intent or no outcome arrived in time.
    #[error(transparent)]
    Store(#[from] StoreError),
}
