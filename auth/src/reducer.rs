//! Authentication reducer.
//!
//! This reducer is the only writer of [`AuthState`].
//!
//! # Flow
//!
//! 1. `Login` while idle, failed or authenticated: bump the attempt number,
//!    mark the state as authenticating, clear the error, return the login
//!    effect
//! 2. The login effect calls the gateway exactly once
//! 3. The effect feeds back `LoginSucceeded` or `LoginFailed` tagged with
//!    the attempt number it was started under
//! 4. The outcome settles the state (authenticated or failed)
//!
//! A `Login` that arrives while an exchange is in flight is ignored. An
//! outcome settles the state only if its attempt is the current one and that
//! attempt is still in flight. Exchanges abandoned by `Logout` keep running
//! and their outcomes are dropped, including when a newer login is in flight.
//! `Logout` restores the initial user, loading and error fields.

use crate::actions::AuthAction;
use crate::constants::{GATEWAY_UNAVAILABLE, LOGIN_FAILED};
use crate::environment::AuthEnvironment;
use crate::error::GatewayError;
use crate::form::LoginCredentials;
use crate::gateway::AuthGateway;
use crate::state::AuthState;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use userdesk_core::effect::Effect;
use userdesk_core::reducer::Reducer;
use userdesk_core::{SmallVec, async_effect, smallvec};

/// Authentication reducer.
#[derive(Debug)]
pub struct AuthReducer<G> {
    /// Phantom data to hold the gateway type.
    _phantom: std::marker::PhantomData<fn() -> G>,
}

impl<G> AuthReducer<G> {
    /// Create a new auth reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G> Default for AuthReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Clone for AuthReducer<G> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<G> Reducer for AuthReducer<G>
where
    G: AuthGateway + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<G>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Login: start one exchange unless one is already in flight
            // ═══════════════════════════════════════════════════════════════
            AuthAction::Login { credentials } => {
                if state.loading {
                    tracing::debug!(
                        username = %credentials.username,
                        "Ignoring login: an exchange is already in flight"
                    );
                    metrics::counter!("auth.login.ignored", "reason" => "in_flight").increment(1);
                    return smallvec![Effect::None];
                }

                tracing::info!(username = %credentials.username, "Login started");
                metrics::counter!("auth.login.attempts").increment(1);

                // The current user (if any) stays until the outcome arrives
                state.attempt += 1;
                state.loading = true;
                state.error = None;

                smallvec![login_effect(env.gateway.clone(), state.attempt, credentials)]
            },

            // ═══════════════════════════════════════════════════════════════
            // LoginSucceeded: settle as authenticated
            // ═══════════════════════════════════════════════════════════════
            AuthAction::LoginSucceeded { attempt, user } => {
                if !state.settles_with(attempt) {
                    tracing::debug!(
                        attempt,
                        current = state.attempt,
                        user_id = user.id,
                        "Ignoring stale login success"
                    );
                    metrics::counter!("auth.login.ignored", "reason" => "stale").increment(1);
                    return smallvec![Effect::None];
                }

                tracing::info!(user_id = user.id, username = %user.username, "Login succeeded");
                metrics::counter!("auth.login.succeeded").increment(1);

                state.user = Some(user);
                state.loading = false;
                state.error = None;
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // LoginFailed: settle as failed
            // ═══════════════════════════════════════════════════════════════
            AuthAction::LoginFailed { attempt, error } => {
                if !state.settles_with(attempt) {
                    tracing::debug!(
                        attempt,
                        current = state.attempt,
                        %error,
                        "Ignoring stale login failure"
                    );
                    metrics::counter!("auth.login.ignored", "reason" => "stale").increment(1);
                    return smallvec![Effect::None];
                }

                tracing::warn!(%error, "Login failed");
                metrics::counter!("auth.login.failed").increment(1);

                state.user = None;
                state.loading = false;
                state.error = Some(error);
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Logout: back to the initial state
            // ═══════════════════════════════════════════════════════════════
            AuthAction::Logout => {
                if let Some(user) = &state.user {
                    tracing::info!(user_id = user.id, "Logged out");
                }
                *state = AuthState {
                    attempt: state.attempt,
                    ..AuthState::initial()
                };
                smallvec![Effect::None]
            },
        }
    }
}

/// The login effect: one gateway call resolved into one outcome action.
///
/// Never resolves to `None`, so every accepted login ends in exactly one
/// terminal transition.
fn login_effect<G>(
    gateway: Option<G>,
    attempt: u64,
    credentials: LoginCredentials,
) -> Effect<AuthAction>
where
    G: AuthGateway + 'static,
{
    async_effect! {
        let Some(gateway) = gateway else {
            tracing::error!("Login attempted without an auth gateway");
            return Some(AuthAction::LoginFailed {
                attempt,
                error: GATEWAY_UNAVAILABLE.to_string(),
            });
        };

        let outcome = AssertUnwindSafe(async { gateway.login(credentials).await })
            .catch_unwind()
            .await;

        let action = match outcome {
            Ok(Ok(user)) => AuthAction::LoginSucceeded { attempt, user },
            Ok(Err(error)) => AuthAction::LoginFailed {
                attempt,
                error: failure_message(&error),
            },
            Err(_) => {
                tracing::error!("Auth gateway panicked during login");
                AuthAction::LoginFailed {
                    attempt,
                    error: LOGIN_FAILED.to_string(),
                }
            },
        };
        Some(action)
    }
}

/// User-facing message for a gateway error.
fn failure_message(error: &GatewayError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        LOGIN_FAILED.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockAuthGateway;
    use crate::state::User;
    use userdesk_testing::{ReducerTest, assertions};

    type TestReducer = AuthReducer<MockAuthGateway>;

    fn user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            gender: "female".to_string(),
            image: "https://example.com/alice.png".to_string(),
            token: "token-1".to_string(),
        }
    }

    fn env() -> AuthEnvironment<MockAuthGateway> {
        AuthEnvironment::new(MockAuthGateway::succeeding(user()))
    }

    fn authenticating() -> AuthState {
        AuthState {
            loading: true,
            attempt: 1,
            ..AuthState::default()
        }
    }

    #[test]
    fn test_login_from_idle_starts_exchange() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AuthState::default())
            .when_action(AuthAction::login("alice", "secret"))
            .then_state(|state| {
                assert!(state.loading);
                assert_eq!(state.attempt, 1);
                assert_eq!(state.error, None);
                assert_eq!(state.user, None);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_login_from_failed_clears_error() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AuthState {
                error: Some("Invalid credentials".to_string()),
                ..AuthState::default()
            })
            .when_action(AuthAction::login("alice", "secret"))
            .then_state(|state| {
                assert!(state.loading);
                assert_eq!(state.error, None);
            })
            .run();
    }

    #[test]
    fn test_login_while_authenticated_keeps_user() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AuthState {
                user: Some(user()),
                ..AuthState::default()
            })
            .when_action(AuthAction::login("bob", "hunter2"))
            .then_state(|state| {
                assert!(state.loading);
                assert_eq!(state.user, Some(user()));
            })
            .run();
    }

    #[test]
    fn test_login_while_in_flight_is_ignored() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(authenticating())
            .when_action(AuthAction::login("alice", "secret"))
            .then_state(|state| {
                assert_eq!(*state, authenticating());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_success_settles_authenticated() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(authenticating())
            .when_action(AuthAction::LoginSucceeded {
                attempt: 1,
                user: user(),
            })
            .then_state(|state| {
                assert_eq!(state.user, Some(user()));
                assert!(!state.loading);
                assert_eq!(state.error, None);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_failure_settles_failed() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AuthState {
                user: Some(user()),
                loading: true,
                error: None,
                attempt: 2,
            })
            .when_action(AuthAction::LoginFailed {
                attempt: 2,
                error: "Invalid credentials".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.user, None);
                assert!(!state.loading);
                assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
            })
            .run();
    }

    #[test]
    fn test_stale_outcomes_are_ignored() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AuthState::default())
            .when_actions([
                AuthAction::LoginSucceeded {
                    attempt: 0,
                    user: user(),
                },
                AuthAction::LoginFailed {
                    attempt: 0,
                    error: "late".to_string(),
                },
            ])
            .then_state(|state| {
                assert_eq!(*state, AuthState::initial());
            })
            .run();
    }

    #[test]
    fn test_outcome_of_abandoned_attempt_ignored_while_newer_in_flight() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AuthState {
                loading: true,
                attempt: 2,
                ..AuthState::default()
            })
            .when_actions([
                AuthAction::LoginSucceeded {
                    attempt: 1,
                    user: user(),
                },
                AuthAction::LoginFailed {
                    attempt: 2,
                    error: "Invalid credentials".to_string(),
                },
            ])
            .then_state(|state| {
                assert_eq!(state.user, None);
                assert!(!state.loading);
                assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
                assert_eq!(state.attempt, 2);
            })
            .run();
    }

    #[test]
    fn test_logout_restores_initial_state() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AuthState {
                user: Some(user()),
                loading: true,
                error: Some("stale".to_string()),
                attempt: 4,
            })
            .when_action(AuthAction::Logout)
            .then_state(|state| {
                assert!(state.is_signed_out());
                assert_eq!(state.attempt, 4);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn test_login_effect_without_gateway_fails_at_once() {
        let effect = login_effect::<MockAuthGateway>(None, 3, LoginCredentials::new("alice", "secret"));

        let Effect::Future(fut) = effect else {
            unreachable!("login effect is always a future");
        };
        assert_eq!(
            fut.await,
            Some(AuthAction::LoginFailed {
                attempt: 3,
                error: "Auth service is not available".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_login_effect_maps_gateway_outcomes() {
        let cases = [
            (
                MockAuthGateway::succeeding(user()),
                AuthAction::LoginSucceeded { attempt: 7, user: user() },
            ),
            (
                MockAuthGateway::failing(GatewayError::rejected(400, "Invalid credentials")),
                AuthAction::LoginFailed { attempt: 7, error: "Invalid credentials".to_string() },
            ),
            (
                MockAuthGateway::failing(GatewayError::rejected(500, "")),
                AuthAction::LoginFailed { attempt: 7, error: "Login failed".to_string() },
            ),
            (
                MockAuthGateway::panicking(),
                AuthAction::LoginFailed { attempt: 7, error: "Login failed".to_string() },
            ),
        ];

        for (gateway, expected) in cases {
            let effect = login_effect(Some(gateway.clone()), 7, LoginCredentials::new("alice", "secret"));
            let Effect::Future(fut) = effect else {
                unreachable!("login effect is always a future");
            };
            assert_eq!(fut.await, Some(expected));
            assert_eq!(gateway.calls(), 1);
        }
    }
}
