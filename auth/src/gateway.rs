//! Auth gateway: exchanges credentials for a user.
//!
//! The gateway performs exactly one network exchange per call and never
//! retries. Any failure comes back as a [`GatewayError`] whose display text
//! is a message fit for the user.

use crate::config::AuthConfig;
use crate::error::{GatewayError, Result};
use crate::form::LoginCredentials;
use crate::state::User;
use reqwest::{Client, StatusCode};
use std::future::Future;

/// Credential exchange.
///
/// Implementations must be cheap to clone: the auth reducer moves a clone
/// into every login effect.
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a user.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The request cannot be sent → `GatewayError::Transport`
    /// - The endpoint rejects it → `GatewayError::Rejected`
    /// - The success body is not a user → `GatewayError::Decode`
    fn login(
        &self,
        credentials: LoginCredentials,
    ) -> impl Future<Output = Result<User>> + Send;
}

/// Gateway backed by the HTTP login endpoint.
///
/// Sends `POST {api_url}/auth/login` with the credentials as JSON.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    http_client: Client,
    login_url: String,
}

impl HttpAuthGateway {
    /// Create a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        Ok(Self::with_client(http_client, config))
    }

    /// Create a gateway that shares an existing HTTP client.
    #[must_use]
    pub fn with_client(http_client: Client, config: &AuthConfig) -> Self {
        Self {
            http_client,
            login_url: config.login_url(),
        }
    }

    /// The endpoint this gateway posts to.
    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: LoginCredentials) -> Result<User> {
        tracing::debug!(username = %credentials.username, url = %self.login_url, "Sending login request");

        let response = self
            .http_client
            .post(&self.login_url)
            .json(&credentials)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = rejection_message(status, &body);
            tracing::warn!(status = status.as_u16(), %message, "Login rejected");
            return Err(GatewayError::rejected(status.as_u16(), message));
        }

        response
            .json::<User>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Message for a non-success response.
///
/// Prefers the body's `message` field, then the status description.
fn rejection_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty());

    from_body.unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => format!("Login request failed: {} {reason}", status.as_u16()),
        None => format!("Login request failed with status {}", status.as_u16()),
    })
}
