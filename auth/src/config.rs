//! Authentication configuration.
//!
//! Values come from the application (see `AuthConfig::from_env`), never
//! from constants scattered through the gateway.

use crate::constants::{DEFAULT_API_URL, DEFAULT_LANDING_ROUTE};
use std::time::Duration;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "USERDESK_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "USERDESK_REQUEST_TIMEOUT_SECS";

/// Login exchange configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// API base URL. The login endpoint is `{api_url}/auth/login`.
    pub api_url: String,

    /// Optional whole-request timeout for the login exchange.
    ///
    /// Default: none (a hung exchange keeps the store authenticating).
    pub request_timeout: Option<Duration>,

    /// Route shown after a successful login.
    ///
    /// Default: `/welcome`
    pub landing_route: String,
}

impl AuthConfig {
    /// Create configuration for the given API base URL.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the landing route.
    #[must_use]
    pub fn with_landing_route(mut self, route: impl Into<String>) -> Self {
        self.landing_route = route.into();
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.is_empty()) {
            config.api_url = url;
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Some(Duration::from_secs(secs)),
                Ok(_) => config.request_timeout = None,
                Err(_) => tracing::warn!(
                    value = %raw,
                    "Ignoring {REQUEST_TIMEOUT_ENV}: not a number of seconds"
                ),
            }
        }

        config
    }

    /// The login endpoint URL.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.api_url.trim_end_matches('/'))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            landing_route: DEFAULT_LANDING_ROUTE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.api_url, "https://dummyjson.com");
        assert_eq!(config.landing_route, "/welcome");
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.login_url(), "https://dummyjson.com/auth/login");
    }

    #[test]
    fn test_login_url_trims_trailing_slash() {
        let config = AuthConfig::new("http://localhost:8080/");
        assert_eq!(config.login_url(), "http://localhost:8080/auth/login");
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (API_URL_ENV, "http://api.internal"),
            (REQUEST_TIMEOUT_ENV, "15"),
        ]);

        let config = AuthConfig::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.api_url, "http://api.internal");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_from_lookup_ignores_bad_timeout() {
        let config = AuthConfig::from_lookup(|key| {
            (key == REQUEST_TIMEOUT_ENV).then(|| "soon".to_string())
        });
        assert_eq!(config, AuthConfig::default());
    }
}
