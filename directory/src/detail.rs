//! User detail editor.
//!
//! The editor keeps two copies of the profile: the last saved one and the
//! draft being edited. Outside edit mode they are always equal.

use crate::api::DirectoryApi;
use crate::error::Result;
use crate::model::UserProfile;
use std::fmt;

/// Shown after a successful save.
pub const UPDATE_SUCCEEDED: &str = "User updated successfully";

/// Shown after a failed save.
pub const UPDATE_FAILED: &str = "Error updating user";

/// Transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Something worked.
    Success(String),
    /// Something did not.
    Error(String),
}

impl Notice {
    /// The message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    /// Whether this reports a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// View/edit state for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetailEditor {
    original: UserProfile,
    draft: UserProfile,
    editing: bool,
}

impl UserDetailEditor {
    /// Read-only editor over `profile`.
    #[must_use]
    pub fn new(profile: UserProfile) -> Self {
        Self {
            draft: profile.clone(),
            original: profile,
            editing: false,
        }
    }

    /// Fetch user `id` and open it read-only.
    ///
    /// # Errors
    ///
    /// Returns the directory error if the user cannot be fetched.
    pub async fn load<A: DirectoryApi>(api: &A, id: u64) -> Result<Self> {
        let profile = api.get_user(id).await?;
        tracing::debug!(user_id = id, "User loaded");
        Ok(Self::new(profile))
    }

    /// Whether the draft can be edited.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Last saved profile.
    #[must_use]
    pub const fn original(&self) -> &UserProfile {
        &self.original
    }

    /// Profile as currently shown.
    #[must_use]
    pub const fn draft(&self) -> &UserProfile {
        &self.draft
    }

    /// Mutable draft, only while editing.
    pub fn draft_mut(&mut self) -> Option<&mut UserProfile> {
        if self.editing {
            Some(&mut self.draft)
        } else {
            None
        }
    }

    /// Whether the draft differs from the saved profile.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Enter or leave edit mode.
    ///
    /// Leaving discards unsaved changes.
    pub fn toggle_edit(&mut self) {
        self.editing = !self.editing;
        if !self.editing {
            self.draft = self.original.clone();
        }
    }

    /// Send the draft to the directory.
    ///
    /// On success the draft becomes the saved profile and edit mode ends. On
    /// failure the editor stays in edit mode with the draft intact.
    pub async fn save<A: DirectoryApi>(&mut self, api: &A) -> Notice {
        match api.update_user(self.draft.id, &self.draft).await {
            Ok(()) => {
                self.original = self.draft.clone();
                self.editing = false;
                Notice::Success(UPDATE_SUCCEEDED.to_string())
            },
            Err(error) => {
                tracing::warn!(user_id = self.draft.id, %error, "User update failed");
                Notice::Error(UPDATE_FAILED.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            username: "emilys".to_string(),
            email: "emily.johnson@x.dummyjson.com".to_string(),
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_starts_read_only() {
        let mut editor = UserDetailEditor::new(profile());
        assert!(!editor.is_editing());
        assert!(editor.draft_mut().is_none());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_leaving_edit_mode_reverts() {
        let mut editor = UserDetailEditor::new(profile());
        editor.toggle_edit();
        assert!(editor.is_editing());

        if let Some(draft) = editor.draft_mut() {
            draft.email = "changed@example.com".to_string();
            draft.address.city = "Phoenix".to_string();
        }
        assert!(editor.is_dirty());

        editor.toggle_edit();
        assert!(!editor.is_editing());
        assert_eq!(editor.draft(), &profile());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_notice_display() {
        let notice = Notice::Success(UPDATE_SUCCEEDED.to_string());
        assert!(notice.is_success());
        assert_eq!(notice.to_string(), "User updated successfully");
        assert!(!Notice::Error(UPDATE_FAILED.to_string()).is_success());
    }
}
