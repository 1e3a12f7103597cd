//! Login form and credential validation.
//!
//! The form validates locally and fails closed: a submission with a missing
//! username or password never produces [`LoginCredentials`], so nothing
//! reaches the auth store. Loading and error feedback flow back into the form
//! only through [`LoginForm::observe`].

use crate::state::AuthState;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Username and password for one login exchange.
///
/// Serialized as the request body of the login endpoint. Never persisted.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    /// Login name.
    pub username: String,

    /// Password (never logged).
    pub password: String,
}

impl LoginCredentials {
    /// Create credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check that both fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming every empty field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.username.is_empty() {
            missing.push(Field::Username);
        }
        if self.password.is_empty() {
            missing.push(Field::Password);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A required login form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The username field.
    Username,
    /// The password field.
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => f.write_str("username"),
            Self::Password => f.write_str("password"),
        }
    }
}

/// Required fields were left empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required {}", join_fields(.missing))]
pub struct ValidationError {
    /// Every field that failed presence validation.
    pub missing: Vec<Field>,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One text input of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    value: String,
    dirty: bool,
}

impl FormField {
    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, marking the field as touched.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    /// Whether the user touched the field (or a submit flagged it).
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Presence validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.value.is_empty()
    }

    /// Whether the UI should show this field's error.
    #[must_use]
    pub fn shows_error(&self) -> bool {
        self.dirty && !self.is_valid()
    }
}

/// The login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Username input.
    pub username: FormField,

    /// Password input.
    pub password: FormField,

    /// "Remember me" checkbox. UI-only, never sent.
    pub remember: bool,

    loading: bool,
    error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: FormField::default(),
            password: FormField::default(),
            remember: true,
            loading: false,
            error: None,
        }
    }
}

impl LoginForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form and build credentials.
    ///
    /// On failure each invalid field is marked dirty so its error shows.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the username or password is empty.
    pub fn submit(&mut self) -> Result<LoginCredentials, ValidationError> {
        let credentials = LoginCredentials::new(self.username.value(), self.password.value());

        if let Err(error) = credentials.validate() {
            for field in &error.missing {
                match field {
                    Field::Username => self.username.dirty = true,
                    Field::Password => self.password.dirty = true,
                }
            }
            return Err(error);
        }

        Ok(credentials)
    }

    /// Mirror the store's loading flag and last error.
    pub fn observe(&mut self, state: &AuthState) {
        self.loading = state.loading;
        self.error.clone_from(&state.error);
    }

    /// Show a local error that never went through the store.
    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Whether a login exchange is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error to show above the form.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
