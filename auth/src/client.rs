//! Intent facade over the auth store.
//!
//! [`AuthClient`] is the only component that sends actions to the auth
//! store. Intents are fire-and-forget: their effect is observable only
//! through store subscriptions and state reads.

use crate::actions::AuthAction;
use crate::constants::DISPATCH_FAILED;
use crate::form::{LoginCredentials, LoginForm, ValidationError};
use crate::gateway::AuthGateway;
use crate::state::AuthState;
use crate::{AuthStore, error::LoginError};
use std::time::Duration;
use tokio::sync::broadcast;
use userdesk_runtime::StoreError;

/// Sends login and logout intents to an auth store.
pub struct AuthClient<G>
where
    G: AuthGateway + Clone + 'static,
{
    store: AuthStore<G>,
}

impl<G> Clone for AuthClient<G>
where
    G: AuthGateway + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<G> AuthClient<G>
where
    G: AuthGateway + Clone + 'static,
{
    /// Create a client for `store`.
    #[must_use]
    pub const fn new(store: AuthStore<G>) -> Self {
        Self { store }
    }

    /// The store this client sends to, for subscriptions and reads.
    #[must_use]
    pub const fn store(&self) -> &AuthStore<G> {
        &self.store
    }

    /// Ask to sign in.
    ///
    /// Credentials with an empty field are rejected here and never reach
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the username or password is empty.
    pub async fn submit_login(&self, credentials: LoginCredentials) -> Result<(), ValidationError> {
        credentials.validate()?;
        self.dispatch(AuthAction::Login { credentials }).await;
        Ok(())
    }

    /// Submit a login form.
    ///
    /// Invalid fields are marked on the form. If the intent cannot be
    /// dispatched the form shows a local error instead.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the username or password is empty.
    pub async fn submit_form(&self, form: &mut LoginForm) -> Result<(), ValidationError> {
        let credentials = form.submit()?;

        if let Err(error) = self.store.send(AuthAction::Login { credentials }).await {
            tracing::error!(%error, "Error dispatching login action");
            form.set_error(DISPATCH_FAILED);
        }
        Ok(())
    }

    /// Sign out.
    pub async fn logout(&self) {
        self.dispatch(AuthAction::Logout).await;
    }

    /// Sign in and wait for the exchange to settle.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A field is empty → `LoginError::Validation`
    /// - No outcome arrives within `timeout` or the store is shutting down → `LoginError::Store`
    pub async fn login_and_wait(
        &self,
        credentials: LoginCredentials,
        timeout: Duration,
    ) -> Result<AuthState, LoginError> {
        credentials.validate()?;

        let mut outcomes = self.store.subscribe_actions();
        self.store.send(AuthAction::Login { credentials }).await?;

        // Either this login or the one it was ignored for
        let attempt = self.store.state(|state| state.attempt).await;

        tokio::time::timeout(timeout, async {
            loop {
                match outcomes.recv().await {
                    Ok(action) if action.attempt() == Some(attempt) => return Ok(()),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Login waiter lagged behind the store");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)??;

        Ok(self.snapshot().await)
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> AuthState {
        self.store.state(Clone::clone).await
    }

    async fn dispatch(&self, action: AuthAction) {
        if let Err(error) = self.store.send(action).await {
            tracing::warn!(%error, "Dropped auth intent");
        }
    }
}
