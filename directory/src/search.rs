//! Keyword search widget.

use crate::api::DirectoryApi;
use crate::error::DirectoryError;
use crate::model::UserSummary;

/// Default label on the search button.
pub const DEFAULT_BUTTON_TEXT: &str = "Search";

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing was requested: the term or the endpoint was empty.
    Skipped,
    /// The endpoint answered.
    Results(Vec<UserSummary>),
    /// The request failed.
    Failed(DirectoryError),
}

/// A search box bound to one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBar {
    button_text: String,
    api_url: String,
    term: String,
}

impl SearchBar {
    /// Create a search bar for `api_url` with the default button label.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            button_text: DEFAULT_BUTTON_TEXT.to_string(),
            api_url: api_url.into(),
            term: String::new(),
        }
    }

    /// Override the button label.
    #[must_use]
    pub fn with_button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = text.into();
        self
    }

    /// Button label.
    #[must_use]
    pub fn button_text(&self) -> &str {
        &self.button_text
    }

    /// Endpoint searched.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Current term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Replace the term.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Run the search.
    ///
    /// An empty term or endpoint skips the request entirely.
    pub async fn search<A: DirectoryApi>(&self, api: &A) -> SearchOutcome {
        if self.term.is_empty() || self.api_url.is_empty() {
            return SearchOutcome::Skipped;
        }

        match api.search(&self.api_url, &self.term).await {
            Ok(users) => SearchOutcome::Results(users),
            Err(error) => {
                tracing::warn!(term = %self.term, %error, "Search failed");
                SearchOutcome::Failed(error)
            },
        }
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new(String::new())
    }
}
