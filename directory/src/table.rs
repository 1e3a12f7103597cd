//! User list table.

use crate::config::DEFAULT_SEARCH_URL;
use crate::model::UserSummary;
use crate::search::SearchOutcome;

/// Title of the user list page.
pub const USER_LIST_TITLE: &str = "List of Users";

/// A table column: which record field, under which header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Record field shown in this column.
    pub field_name: String,
    /// Header text.
    pub display_text: String,
}

impl Column {
    /// Create a column.
    #[must_use]
    pub fn new(field_name: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            display_text: display_text.into(),
        }
    }
}

/// Search results laid out as rows and columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableList {
    title: String,
    api_url: String,
    columns: Vec<Column>,
    data: Vec<UserSummary>,
}

impl TableList {
    /// An empty table.
    #[must_use]
    pub fn new(title: impl Into<String>, api_url: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            api_url: api_url.into(),
            columns,
            data: Vec::new(),
        }
    }

    /// The user list page against the default search endpoint.
    #[must_use]
    pub fn user_list() -> Self {
        Self::user_list_at(DEFAULT_SEARCH_URL)
    }

    /// The user list page against `api_url`.
    #[must_use]
    pub fn user_list_at(api_url: impl Into<String>) -> Self {
        Self::new(
            USER_LIST_TITLE,
            api_url,
            vec![
                Column::new("firstName", "First Name"),
                Column::new("lastName", "Last Name"),
                Column::new("email", "Email"),
                Column::new("phone", "Phone"),
            ],
        )
    }

    /// Page title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Search endpoint feeding this table.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header row.
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.display_text.as_str()).collect()
    }

    /// Records currently shown.
    #[must_use]
    pub fn data(&self) -> &[UserSummary] {
        &self.data
    }

    /// Replace the records.
    pub fn set_data(&mut self, data: Vec<UserSummary>) {
        self.data = data;
    }

    /// Take a search outcome.
    ///
    /// Results replace the records. A failure is logged and leaves the
    /// records as they were, and so does a skipped search.
    pub fn apply(&mut self, outcome: SearchOutcome) {
        match outcome {
            SearchOutcome::Results(users) => self.set_data(users),
            SearchOutcome::Failed(error) => {
                tracing::error!(%error, "Search error");
            },
            SearchOutcome::Skipped => {},
        }
    }

    /// Records projected onto the columns, one cell per column.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.data
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|column| record.cell(&column.field_name))
                    .collect()
            })
            .collect()
    }

    /// The record behind row `index`.
    #[must_use]
    pub fn row_click(&self, index: usize) -> Option<&UserSummary> {
        self.data.get(index)
    }
}
