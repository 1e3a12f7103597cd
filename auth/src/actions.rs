//! Authentication actions.
//!
//! Intents come from the client facade; outcomes are fed back by the login
//! effect the reducer returns.

use crate::form::LoginCredentials;
use crate::state::User;

/// Every event the auth reducer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Intents
    // ═══════════════════════════════════════════════════════════════════════
    /// Start a login exchange.
    Login {
        /// Credentials to exchange.
        credentials: LoginCredentials,
    },

    /// Sign out and return to the initial state.
    Logout,

    // ═══════════════════════════════════════════════════════════════════════
    // Outcomes
    // ═══════════════════════════════════════════════════════════════════════
    /// The gateway returned a user.
    LoginSucceeded {
        /// Attempt number the exchange was started under.
        attempt: u64,

        /// The authenticated user.
        user: User,
    },

    /// The exchange failed.
    LoginFailed {
        /// Attempt number the exchange was started under.
        attempt: u64,

        /// Message to show the user.
        error: String,
    },
}

impl AuthAction {
    /// Build a login intent.
    #[must_use]
    pub fn login(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Login {
            credentials: LoginCredentials::new(username, password),
        }
    }

    /// Whether this action settles a login exchange.
    #[must_use]
    pub const fn is_outcome(&self) -> bool {
        matches!(self, Self::LoginSucceeded { .. } | Self::LoginFailed { .. })
    }

    /// Attempt number carried by an outcome, `None` for intents.
    #[must_use]
    pub const fn attempt(&self) -> Option<u64> {
        match self {
            Self::LoginSucceeded { attempt, .. } | Self::LoginFailed { attempt, .. } => Some(*attempt),
            Self::Login { .. } | Self::Logout => None,
        }
    }
}
