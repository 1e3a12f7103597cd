//! # Userdesk Testing
//!
//! Testing utilities for Userdesk reducers, stores and environments.
//!
//! This crate provides:
//! - Deterministic clocks
//! - A recorder for values observed by store listeners
//! - Async polling helpers
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use userdesk_testing::helpers::Recorder;
//!
//! #[tokio::test]
//! async fn login_flow() {
//!     let store = auth_store(MockAuthGateway::succeeding(user()));
//!     let phases = Recorder::new();
//!     let _sub = store.select(AuthState::phase, phases.listener()).await;
//!
//!     store.send(AuthAction::login("emilys", "emilyspass")).await?;
//!     phases.wait_for_len(3).await;
//! }
//! ```

use chrono::{DateTime, Utc};
use userdesk_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use userdesk_testing::mocks::FixedClock;
    /// use userdesk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to
    ///
    /// Used for expiry tests where time has to pass between two calls.
    #[derive(Debug)]
    pub struct ManualClock {
        time: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        /// Create a clock stopped at `time`
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Mutex::new(time),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities
pub mod helpers {
    use std::future::Future;
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    /// Collects every value handed to a listener
    ///
    /// Clones share the same buffer, so one clone can be moved into a
    /// listener while the test keeps another.
    #[derive(Debug)]
    pub struct Recorder<T> {
        values: Arc<Mutex<Vec<T>>>,
    }

    impl<T> Clone for Recorder<T> {
        fn clone(&self) -> Self {
            Self {
                values: Arc::clone(&self.values),
            }
        }
    }

    impl<T> Default for Recorder<T> {
        fn default() -> Self {
            Self {
                values: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl<T> Recorder<T>
    where
        T: Clone + Send + 'static,
    {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Append a value
        pub fn record(&self, value: T) {
            self.values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value);
        }

        /// A listener closure that records every value it is called with
        #[must_use]
        pub fn listener(&self) -> impl Fn(&T) + Send + Sync + 'static {
            let recorder = self.clone();
            move |value: &T| recorder.record(value.clone())
        }

        /// Snapshot of everything recorded so far
        #[must_use]
        pub fn values(&self) -> Vec<T> {
            self.values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of recorded values
        #[must_use]
        pub fn len(&self) -> usize {
            self.values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// Returns `true` if nothing was recorded
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Wait until at least `len` values were recorded
        ///
        /// # Panics
        ///
        /// Panics if fewer values arrive within one second.
        #[allow(clippy::panic)] // Test helper
        pub async fn wait_for_len(&self, len: usize) {
            if !wait_until(Duration::from_secs(1), move || async move { self.len() >= len }).await {
                panic!(
                    "expected at least {len} recorded values, got {}",
                    self.len()
                );
            }
        }
    }

    /// Poll `condition` until it holds or `timeout` elapses
    ///
    /// Returns whether the condition was met.
    pub async fn wait_until<F, Fut>(timeout: Duration, mut condition: F) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if condition().await {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Install a test subscriber honouring `RUST_LOG`
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::Recorder;
pub use mocks::{FixedClock, ManualClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_manual_clock_advances() {
        let start = test_clock().now();
        let clock = ManualClock::new(start);

        clock.advance(chrono::Duration::minutes(61));

        assert_eq!(clock.now() - start, chrono::Duration::minutes(61));
    }

    #[tokio::test]
    async fn test_recorder_listener() {
        let recorder = Recorder::new();
        let listener = recorder.listener();

        listener(&1);
        listener(&2);

        recorder.wait_for_len(2).await;
        assert_eq!(recorder.values(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_wait_until_gives_up() {
        let met = helpers::wait_until(Duration::from_millis(20), || async { false }).await;
        assert!(!met);
    }
}
