//! Application configuration.
//!
//! Loads configuration from environment variables with defaults for
//! anything unset.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use userdesk_auth::AuthConfig;
use userdesk_directory::DirectoryConfig;
use userdesk_directory::config::DEFAULT_SEARCH_URL;

/// Environment variable selecting the deployment environment.
pub const ENVIRONMENT_ENV: &str = "USERDESK_ENV";

/// Environment variable overriding the user search endpoint.
pub const SEARCH_URL_ENV: &str = "USERDESK_SEARCH_URL";

/// Environment variable enabling the Prometheus endpoint.
pub const METRICS_ADDR_ENV: &str = "USERDESK_METRICS_ADDR";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `USERDESK_ENV` named no known environment.
    #[error("Unknown environment '{0}' (expected dev, sit, uat or prod)")]
    UnknownEnvironment(String),

    /// `USERDESK_METRICS_ADDR` is not a socket address.
    #[error("Invalid metrics address '{0}'")]
    InvalidMetricsAddr(String),
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Local development.
    #[default]
    Dev,
    /// System integration testing.
    Sit,
    /// User acceptance testing.
    Uat,
    /// Production.
    Prod,
}

impl Environment {
    /// Short name, as accepted by `USERDESK_ENV`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Sit => "sit",
            Self::Uat => "uat",
            Self::Prod => "prod",
        }
    }

    /// Whether this is production.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Prod)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "sit" => Ok(Self::Sit),
            "uat" => Ok(Self::Uat),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Login exchange configuration.
    pub auth: AuthConfig,
    /// Endpoint behind the user list search.
    pub search_url: String,
    /// Where to serve Prometheus metrics, if anywhere.
    pub metrics_addr: Option<SocketAddr>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            auth: AuthConfig::default(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            metrics_addr: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if `USERDESK_ENV` or `USERDESK_METRICS_ADDR` is set to
    /// something unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup(ENVIRONMENT_ENV).filter(|v| !v.is_empty()) {
            Some(name) => name.parse()?,
            None => Environment::default(),
        };

        let metrics_addr = match lookup(METRICS_ADDR_ENV).filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                raw.parse::<SocketAddr>()
                    .map_err(|_| ConfigError::InvalidMetricsAddr(raw))?,
            ),
            None => None,
        };

        let search_url = lookup(SEARCH_URL_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());

        Ok(Self {
            environment,
            auth: AuthConfig::from_lookup(&lookup),
            search_url,
            metrics_addr,
        })
    }

    /// Directory client configuration, sharing the auth API base URL and
    /// request timeout.
    #[must_use]
    pub fn directory(&self) -> DirectoryConfig {
        let config = DirectoryConfig::new(self.auth.api_url.clone()).with_search_url(self.search_url.clone());
        match self.auth.request_timeout {
            Some(timeout) => config.with_request_timeout(timeout),
            None => config,
        }
    }

    /// Request timeout shared by all HTTP clients, if any.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.auth.request_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.environment, Environment::Dev);
        assert_eq!(config.search_url, "https://dummyjson.com/users/search");
        assert_eq!(config.metrics_addr, None);
    }

    #[test]
    fn test_environment_names() {
        assert_eq!("sit".parse::<Environment>(), Ok(Environment::Sit));
        assert_eq!("UAT".parse::<Environment>(), Ok(Environment::Uat));
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Prod));
        assert_eq!(
            "staging".parse::<Environment>(),
            Err(ConfigError::UnknownEnvironment("staging".to_string()))
        );
        assert_eq!(Environment::Prod.to_string(), "prod");
        assert!(Environment::Prod.is_production());
    }

    #[test]
    fn test_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("USERDESK_ENV", "uat"),
            ("USERDESK_API_URL", "http://localhost:4000"),
            ("USERDESK_SEARCH_URL", "http://localhost:4000/users/search"),
            ("USERDESK_METRICS_ADDR", "127.0.0.1:9000"),
            ("USERDESK_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Uat);
        assert_eq!(config.auth.api_url, "http://localhost:4000");
        assert_eq!(config.metrics_addr, Some("127.0.0.1:9000".parse().unwrap()));

        let directory = config.directory();
        assert_eq!(directory.users_url(), "http://localhost:4000/users");
        assert_eq!(directory.search_url, "http://localhost:4000/users/search");
        assert_eq!(directory.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("USERDESK_ENV", "qa")])),
            Err(ConfigError::UnknownEnvironment("qa".to_string()))
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("USERDESK_METRICS_ADDR", "port 9000")])),
            Err(ConfigError::InvalidMetricsAddr("port 9000".to_string()))
        );
    }
}
