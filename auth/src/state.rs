//! Authentication state types.
//!
//! [`AuthState`] is owned by the auth store and only ever changed by
//! [`AuthReducer`](crate::reducer::AuthReducer). Everything else reads it
//! through the derived views in [`selectors`](crate::selectors).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated user as returned by the login endpoint.
///
/// Immutable once received: a successful login replaces it wholesale and a
/// logout drops it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: u64,

    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Gender as reported by the directory.
    pub gender: String,

    /// Avatar URL.
    pub image: String,

    /// Opaque session credential.
    pub token: String,
}

impl User {
    /// Display name (`first_name last_name`).
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Token is a credential and must never end up in logs
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("gender", &self.gender)
            .field("image", &self.image)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Authentication state.
///
/// The initial value is `{ user: None, loading: false, error: None }` with
/// `attempt` at zero. Logout restores the first three fields and keeps
/// `attempt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// The authenticated user, `None` when signed out.
    pub user: Option<User>,

    /// `true` while a login exchange is in flight.
    pub loading: bool,

    /// Message of the last failed login, cleared when a new attempt starts.
    pub error: Option<String>,

    /// Number of the latest accepted login.
    ///
    /// Outcomes carrying any other number are stale.
    pub attempt: u64,
}

impl AuthState {
    /// The state every session starts in.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            user: None,
            loading: false,
            error: None,
            attempt: 0,
        }
    }

    /// Whether user, loading and error hold their initial values.
    #[must_use]
    pub const fn is_signed_out(&self) -> bool {
        self.user.is_none() && !self.loading && self.error.is_none()
    }

    /// Whether an outcome tagged with `attempt` may settle this state.
    #[must_use]
    pub const fn settles_with(&self, attempt: u64) -> bool {
        self.loading && self.attempt == attempt
    }

    /// Phase of the login state machine this state is in.
    #[must_use]
    pub const fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Authenticating
        } else if self.user.is_some() {
            AuthPhase::Authenticated
        } else if self.error.is_some() {
            AuthPhase::Failed
        } else {
            AuthPhase::Idle
        }
    }
}

/// Phase of the login state machine.
///
/// Derived from [`AuthState`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthPhase {
    /// Signed out, no attempt in flight, no error.
    Idle,

    /// A login exchange is in flight.
    Authenticating,

    /// Signed in.
    Authenticated,

    /// The last attempt failed.
    Failed,
}

impl fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
