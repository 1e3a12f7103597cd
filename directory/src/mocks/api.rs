//! In-memory directory API.

use crate::api::DirectoryApi;
use crate::error::{DirectoryError, Result};
use crate::model::{UserProfile, UserSummary};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<u64, UserProfile>,
    search_results: Vec<UserSummary>,
    failure: Option<DirectoryError>,
    update_failure: Option<DirectoryError>,
    searches: Vec<(String, String)>,
    updates: Vec<(u64, UserProfile)>,
}

/// Mock directory API.
///
/// Clones share state, so a test can inspect what the code under test sent.
#[derive(Debug, Clone, Default)]
pub struct MockDirectoryApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockDirectoryApi {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a user.
    #[must_use]
    pub fn with_user(self, profile: UserProfile) -> Self {
        self.lock().users.insert(profile.id, profile);
        self
    }

    /// Answer every search with `results`.
    #[must_use]
    pub fn with_search_results(self, results: Vec<UserSummary>) -> Self {
        self.lock().search_results = results;
        self
    }

    /// Fail every call with `error`.
    #[must_use]
    pub fn failing(self, error: DirectoryError) -> Self {
        self.lock().failure = Some(error);
        self
    }

    /// Fail updates only.
    #[must_use]
    pub fn failing_updates(self, error: DirectoryError) -> Self {
        self.lock().update_failure = Some(error);
        self
    }

    /// Stored copy of user `id`.
    #[must_use]
    pub fn user(&self, id: u64) -> Option<UserProfile> {
        self.lock().users.get(&id).cloned()
    }

    /// `(api_url, keyword)` of every search received.
    #[must_use]
    pub fn searches(&self) -> Vec<(String, String)> {
        self.lock().searches.clone()
    }

    /// `(id, profile)` of every update received.
    #[must_use]
    pub fn updates(&self) -> Vec<(u64, UserProfile)> {
        self.lock().updates.clone()
    }
}

impl DirectoryApi for MockDirectoryApi {
    async fn get_user(&self, id: u64) -> Result<UserProfile> {
        let inner = self.lock();
        if let Some(error) = &inner.failure {
            return Err(error.clone());
        }
        inner.users.get(&id).cloned().ok_or(DirectoryError::NotFound(id))
    }

    async fn update_user(&self, id: u64, profile: &UserProfile) -> Result<()> {
        let mut inner = self.lock();
        inner.updates.push((id, profile.clone()));
        if let Some(error) = inner.failure.as_ref().or(inner.update_failure.as_ref()) {
            return Err(error.clone());
        }
        if !inner.users.contains_key(&id) {
            return Err(DirectoryError::NotFound(id));
        }
        inner.users.insert(id, profile.clone());
        Ok(())
    }

    async fn search(&self, api_url: &str, keyword: &str) -> Result<Vec<UserSummary>> {
        let mut inner = self.lock();
        inner.searches.push((api_url.to_string(), keyword.to_string()));
        if let Some(error) = &inner.failure {
            return Err(error.clone());
        }
        Ok(inner.search_results.clone())
    }
}
