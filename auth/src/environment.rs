//! Authentication environment.
//!
//! This module defines the environment type for dependency injection
//! into [`AuthReducer`](crate::reducer::AuthReducer).

use crate::gateway::AuthGateway;

/// Authentication environment.
///
/// # Type Parameters
///
/// - `G`: Auth gateway
///
/// The gateway is optional so a misconfigured application still produces a
/// consistent store: a login without a gateway fails instead of hanging.
#[derive(Debug, Clone)]
pub struct AuthEnvironment<G>
where
    G: AuthGateway + Clone,
{
    /// Auth gateway, `None` when wiring failed.
    pub gateway: Option<G>,
}

impl<G> AuthEnvironment<G>
where
    G: AuthGateway + Clone,
{
    /// Create an environment around a gateway.
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway: Some(gateway),
        }
    }

    /// Create an environment with no gateway.
    #[must_use]
    pub const fn without_gateway() -> Self {
        Self { gateway: None }
    }

    /// Whether a gateway is wired in.
    #[must_use]
    pub const fn has_gateway(&self) -> bool {
        self.gateway.is_some()
    }
}
