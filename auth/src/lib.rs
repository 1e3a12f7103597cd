//! # Userdesk Authentication
//!
//! Client-side authentication state machine for Userdesk.
//!
//! ## Architecture
//!
//! Authentication is implemented as a reducer plus one effect:
//!
//! ```text
//! AuthClient → Login → AuthReducer → (Authenticating, login effect)
//!                                          │
//!                    AuthGateway::login ◄──┘
//!                                          │
//!        LoginSucceeded / LoginFailed ─────┘ → AuthReducer → (Authenticated | Failed)
//! ```
//!
//! - [`LoginForm`] validates input before anything reaches the store
//! - [`AuthClient`] is the only sender of actions
//! - [`AuthReducer`] is the only writer of [`AuthState`]
//! - [`selectors`] derive read-only views for subscribers
//! - [`RouteGate`] switches between the login surface and the shell
//!
//! ## Example
//!
//! ```rust,no_run
//! use userdesk_auth::{AuthClient, AuthConfig, AuthEnvironment, HttpAuthGateway, LoginCredentials, selectors};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpAuthGateway::new(&AuthConfig::default())?;
//! let store = userdesk_auth::auth_store(AuthEnvironment::new(gateway));
//! let client = AuthClient::new(store.clone());
//!
//! let _loading = store
//!     .select(selectors::is_loading, |loading: &bool| println!("loading: {loading}"))
//!     .await;
//!
//! client.submit_login(LoginCredentials::new("emilys", "emilyspass")).await?;
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod actions;
pub mod client;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod form;
pub mod gate;
pub mod gateway;
pub mod reducer;
pub mod selectors;
pub mod state;

// Mock gateways (enabled by default for tests)
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::AuthAction;
pub use client::AuthClient;
pub use config::AuthConfig;
pub use environment::AuthEnvironment;
pub use error::{GatewayError, LoginError};
pub use form::{Field, FormField, LoginCredentials, LoginForm, ValidationError};
pub use gate::{Navigator, RouteGate, Surface, surface_for};
pub use gateway::{AuthGateway, HttpAuthGateway};
pub use reducer::AuthReducer;
pub use state::{AuthPhase, AuthState, User};

use userdesk_runtime::{Store, StoreConfig};

/// The auth store for gateway `G`.
pub type AuthStore<G> = Store<AuthState, AuthAction, AuthEnvironment<G>, AuthReducer<G>>;

/// Create an auth store in the initial state.
#[must_use]
pub fn auth_store<G>(environment: AuthEnvironment<G>) -> AuthStore<G>
where
    G: AuthGateway + Clone + 'static,
{
    auth_store_with_config(environment, StoreConfig::default())
}

/// Create an auth store with custom store configuration.
#[must_use]
pub fn auth_store_with_config<G>(environment: AuthEnvironment<G>, config: StoreConfig) -> AuthStore<G>
where
    G: AuthGateway + Clone + 'static,
{
    Store::with_config(AuthState::initial(), AuthReducer::new(), environment, config)
}
