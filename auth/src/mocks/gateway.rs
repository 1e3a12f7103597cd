//! Mock auth gateway for testing.

use crate::error::{GatewayError, Result};
use crate::form::LoginCredentials;
use crate::gateway::AuthGateway;
use crate::state::User;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// What the mock answers with.
#[derive(Debug, Clone)]
enum Behavior {
    /// Every login succeeds with this user.
    Succeed(Box<User>),
    /// Every login fails with this error.
    Fail(GatewayError),
    /// Look the credentials up in a table of accounts.
    Accounts(HashMap<(String, String), User>),
    /// The exchange panics.
    Panic,
    /// The exchange never completes.
    Hang,
}

/// Mock auth gateway.
///
/// Clones share the call log, so a test can keep one clone while the store
/// owns another.
#[derive(Debug, Clone)]
pub struct MockAuthGateway {
    behavior: Behavior,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<LoginCredentials>>>,
}

impl MockAuthGateway {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A gateway where every login succeeds with `user`.
    #[must_use]
    pub fn succeeding(user: User) -> Self {
        Self::with_behavior(Behavior::Succeed(Box::new(user)))
    }

    /// A gateway where every login fails with `error`.
    #[must_use]
    pub fn failing(error: GatewayError) -> Self {
        Self::with_behavior(Behavior::Fail(error))
    }

    /// A gateway that knows a set of accounts.
    ///
    /// Unknown username/password pairs are rejected with status 400 and
    /// `"Invalid credentials"`.
    #[must_use]
    pub fn with_accounts<I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = (LoginCredentials, User)>,
    {
        let accounts = accounts
            .into_iter()
            .map(|(credentials, user)| ((credentials.username, credentials.password), user))
            .collect();
        Self::with_behavior(Behavior::Accounts(accounts))
    }

    /// A gateway whose exchange panics.
    #[must_use]
    pub fn panicking() -> Self {
        Self::with_behavior(Behavior::Panic)
    }

    /// A gateway whose exchange never completes.
    #[must_use]
    pub fn hanging() -> Self {
        Self::with_behavior(Behavior::Hang)
    }

    /// Wait this long before answering.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of login calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every set of credentials received, in call order.
    #[must_use]
    pub fn received(&self) -> Vec<LoginCredentials> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuthGateway for MockAuthGateway {
    fn login(&self, credentials: LoginCredentials) -> impl Future<Output = Result<User>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(credentials.clone());

        let behavior = self.behavior.clone();
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            match behavior {
                Behavior::Succeed(user) => Ok(*user),
                Behavior::Fail(error) => Err(error),
                Behavior::Accounts(accounts) => accounts
                    .get(&(credentials.username, credentials.password))
                    .cloned()
                    .ok_or_else(|| GatewayError::rejected(400, "Invalid credentials")),
                #[allow(clippy::panic)] // Simulates a faulty gateway
                Behavior::Panic => panic!("mock auth gateway panicked"),
                Behavior::Hang => std::future::pending().await,
            }
        }
    }
}
