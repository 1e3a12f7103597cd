//! Users directory API.

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use crate::model::{SearchResponse, UserProfile, UserSummary};
use reqwest::{Client, Response, StatusCode};
use std::future::Future;

/// Access to the users directory.
pub trait DirectoryApi: Send + Sync {
    /// Fetch one user.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` for an unknown id, or a transport,
    /// status or decode error.
    fn get_user(&self, id: u64) -> impl Future<Output = Result<UserProfile>> + Send;

    /// Replace a user's editable fields.
    ///
    /// # Errors
    ///
    /// Returns error if the update is not accepted.
    fn update_user(&self, id: u64, profile: &UserProfile) -> impl Future<Output = Result<()>> + Send;

    /// Keyword search against `api_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body has no `users` array.
    fn search(&self, api_url: &str, keyword: &str) -> impl Future<Output = Result<Vec<UserSummary>>> + Send;
}

/// `{api_url}?q={keyword}` with the keyword percent-encoded.
#[must_use]
pub fn search_url(api_url: &str, keyword: &str) -> String {
    format!("{api_url}?q={}", urlencoding::encode(keyword))
}

/// Directory API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    http_client: Client,
    users_url: String,
}

impl HttpDirectoryApi {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: &DirectoryConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| DirectoryError::Configuration(e.to_string()))?;

        Ok(Self::with_client(http_client, config))
    }

    /// Create a client that shares an existing HTTP client.
    #[must_use]
    pub fn with_client(http_client: Client, config: &DirectoryConfig) -> Self {
        Self {
            http_client,
            users_url: config.users_url(),
        }
    }

    fn user_url(&self, id: u64) -> String {
        format!("{}/{id}", self.users_url)
    }
}

/// Map a non-success status to an error, passing successes through.
fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    tracing::warn!(status = status.as_u16(), %url, "Directory request failed");
    Err(DirectoryError::Status {
        status: status.as_u16(),
        url: url.to_string(),
    })
}

impl DirectoryApi for HttpDirectoryApi {
    async fn get_user(&self, id: u64) -> Result<UserProfile> {
        let url = self.user_url(id);
        tracing::debug!(user_id = id, %url, "Fetching user");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(id));
        }

        check_status(response, &url)?
            .json::<UserProfile>()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    async fn update_user(&self, id: u64, profile: &UserProfile) -> Result<()> {
        let url = self.user_url(id);
        tracing::debug!(user_id = id, %url, "Updating user");

        let response = self
            .http_client
            .put(&url)
            .json(profile)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(id));
        }

        check_status(response, &url)?;
        tracing::info!(user_id = id, "User updated");
        Ok(())
    }

    async fn search(&self, api_url: &str, keyword: &str) -> Result<Vec<UserSummary>> {
        let url = search_url(api_url, keyword);
        tracing::debug!(%url, "Searching directory");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let body = check_status(response, &url)?
            .json::<SearchResponse>()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))?;

        tracing::debug!(results = body.users.len(), "Search complete");
        Ok(body.users)
    }
}
