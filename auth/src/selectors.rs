//! Derived views of [`AuthState`].
//!
//! Pure functions of state, recomputed on demand and never stored. Each one
//! can be handed straight to `Store::select`.

use crate::state::{AuthPhase, AuthState, User};

/// Signed in iff a user is present.
#[must_use]
pub const fn is_authenticated(state: &AuthState) -> bool {
    state.user.is_some()
}

/// The signed-in user.
#[must_use]
pub fn current_user(state: &AuthState) -> Option<User> {
    state.user.clone()
}

/// Whether a login exchange is in flight.
#[must_use]
pub const fn is_loading(state: &AuthState) -> bool {
    state.loading
}

/// Message of the last failed login.
#[must_use]
pub fn last_error(state: &AuthState) -> Option<String> {
    state.error.clone()
}

/// Phase of the login state machine.
#[must_use]
pub const fn phase(state: &AuthState) -> AuthPhase {
    state.phase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_user() -> impl Strategy<Value = User> {
        (any::<u64>(), "[a-z]{1,8}", "[a-z]{0,8}").prop_map(|(id, username, token)| User {
            id,
            email: format!("{username}@example.com"),
            first_name: username.clone(),
            last_name: String::new(),
            gender: String::new(),
            image: String::new(),
            username,
            token,
        })
    }

    fn arb_state() -> impl Strategy<Value = AuthState> {
        (
            proptest::option::of(arb_user()),
            any::<bool>(),
            proptest::option::of("[ -~]{0,16}"),
            0u64..8,
        )
            .prop_map(|(user, loading, error, attempt)| AuthState {
                user,
                loading,
                error,
                attempt,
            })
    }

    proptest! {
        #[test]
        fn is_authenticated_iff_user_present(state in arb_state()) {
            prop_assert_eq!(is_authenticated(&state), state.user.is_some());
            prop_assert_eq!(current_user(&state), state.user.clone());
        }

        #[test]
        fn loading_always_reads_as_authenticating(state in arb_state()) {
            prop_assert_eq!(is_loading(&state), phase(&state) == AuthPhase::Authenticating);
        }
    }

    #[test]
    fn test_last_error() {
        let state = AuthState {
            error: Some("Invalid credentials".to_string()),
            ..AuthState::default()
        };
        assert_eq!(last_error(&state).as_deref(), Some("Invalid credentials"));
        assert_eq!(phase(&state), AuthPhase::Failed);
    }
}
