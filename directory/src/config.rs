//! Directory client configuration.

use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://dummyjson.com";

/// Default keyword search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://dummyjson.com/users/search";

/// Directory client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// API base URL. Users live under `{api_url}/users`.
    pub api_url: String,

    /// Keyword search endpoint used by the user list.
    pub search_url: String,

    /// Optional whole-request timeout.
    pub request_timeout: Option<Duration>,
}

impl DirectoryConfig {
    /// Create configuration for the given API base URL.
    ///
    /// The search endpoint follows the base URL.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        let search_url = format!("{}/users/search", api_url.trim_end_matches('/'));
        Self {
            api_url,
            search_url,
            request_timeout: None,
        }
    }

    /// Set the keyword search endpoint.
    #[must_use]
    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// `{api_url}/users`, without a doubled slash.
    #[must_use]
    pub fn users_url(&self) -> String {
        format!("{}/users", self.api_url.trim_end_matches('/'))
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            request_timeout: None,
        }
    }
}
