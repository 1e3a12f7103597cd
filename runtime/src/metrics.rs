//! Prometheus metrics for observability and monitoring.
//!
//! This module describes and exports the metrics Userdesk records:
//! - Store action processing and reducer latency
//! - Effect execution
//! - Login attempts and their outcomes
//! - Graceful shutdown
//!
//! # Example
//!
//! ```rust,no_run
//! use userdesk_runtime::metrics::MetricsServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Serve metrics on port 9090
//! let server = MetricsServer::new("0.0.0.0:9090".parse()?);
//! server.serve()?;
//!
//! // Metrics available at http://localhost:9090/metrics
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use thiserror::Error;

// Re-export metrics macros for use in other crates
pub use metrics::{counter, histogram};

/// Histogram buckets for latency measurements, in seconds
const LATENCY_BUCKETS: &[f64] = &[
    0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus metrics server.
///
/// Exposes metrics on an HTTP endpoint for Prometheus scraping, or keeps a
/// handle for in-process rendering.
pub struct MetricsServer {
    addr: SocketAddr,
    handle: Option<PrometheusHandle>,
}

impl MetricsServer {
    /// Create a new metrics server.
    ///
    /// # Arguments
    ///
    /// * `addr` - Socket address to bind to (e.g., `0.0.0.0:9090`)
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self { addr, handle: None }
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn builder() -> Result<PrometheusBuilder, MetricsError> {
        register_metrics();

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                LATENCY_BUCKETS,
            )
            .map_err(|e| MetricsError::Build(e.to_string()))
    }

    /// Install the recorder without an HTTP listener.
    ///
    /// Use [`MetricsServer::render`] to read the exposition text.
    ///
    /// # Errors
    ///
    /// Returns error if the metrics exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g., in tests), this logs a
    /// warning and leaves the handle empty.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        match Self::builder()?.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(())
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// Install the recorder and serve `/metrics` over HTTP.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built, installed, or bound.
    pub fn serve(&self) -> Result<(), MetricsError> {
        Self::builder()?
            .with_http_listener(self.addr)
            .install()
            .map_err(|e| MetricsError::Install(e.to_string()))?;

        tracing::info!(
            addr = %self.addr,
            "Metrics server started - available at http://{}/metrics",
            self.addr
        );
        Ok(())
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if the recorder was not installed by [`MetricsServer::start`].
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
pub fn register_metrics() {
    // Store Metrics
    describe_counter!(
        "store.commands.total",
        "Total number of actions sent to stores"
    );
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time taken to run a reducer and notify listeners"
    );
    describe_counter!(
        "store.effects.executed",
        "Total number of effects executed, labelled by type"
    );
    describe_counter!(
        "store.shutdown.initiated",
        "Total number of graceful shutdowns started"
    );
    describe_counter!(
        "store.shutdown.completed",
        "Total number of graceful shutdowns that drained all effects"
    );
    describe_counter!(
        "store.shutdown.timeout",
        "Total number of graceful shutdowns that timed out"
    );
    describe_counter!(
        "store.shutdown.rejected_actions",
        "Total number of actions rejected during shutdown"
    );

    // Auth Metrics
    describe_counter!(
        "auth.login.attempts",
        "Total number of login attempts started"
    );
    describe_counter!(
        "auth.login.succeeded",
        "Total number of logins that completed with a user"
    );
    describe_counter!(
        "auth.login.failed",
        "Total number of logins that completed with an error"
    );
    describe_counter!(
        "auth.login.ignored",
        "Total number of login intents or outcomes ignored by the state machine"
    );
}
