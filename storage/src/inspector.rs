//! Storage inspector.
//!
//! Adds entries to the three storage kinds and renders all of them for
//! display. Blank keys or values are ignored rather than stored.

use crate::area::StorageArea;
use crate::cookies::CookieJar;
use crate::error::StorageError;
use chrono::{DateTime, Duration, Utc};
use userdesk_core::environment::Clock;

/// Cookie lifetime when none is given.
pub const DEFAULT_COOKIE_EXPIRY_MINUTES: u32 = 60;

/// Format a time the way HTTP dates are written.
///
/// `Thu, 01 Jan 1970 00:00:00 GMT`
#[must_use]
pub fn gmt_string(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Rendered view of all storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSnapshot {
    /// Session storage as indented JSON.
    pub session: String,
    /// Local storage as indented JSON.
    pub local: String,
    /// One `name: value` / `Expiry:` block per live cookie.
    pub cookies: String,
    /// Current time in GMT.
    pub gmt_time: String,
}

/// Session storage, local storage and cookies behind one clock.
#[derive(Debug)]
pub struct StorageInspector<C: Clock> {
    clock: C,
    session: StorageArea,
    local: StorageArea,
    cookies: CookieJar,
}

impl<C: Clock> StorageInspector<C> {
    /// Empty storage read against `clock`.
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            session: StorageArea::new(),
            local: StorageArea::new(),
            cookies: CookieJar::new(),
        }
    }

    /// Session storage.
    #[must_use]
    pub const fn session(&self) -> &StorageArea {
        &self.session
    }

    /// Local storage.
    #[must_use]
    pub const fn local(&self) -> &StorageArea {
        &self.local
    }

    /// Cookie jar.
    #[must_use]
    pub const fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Store a session entry. Returns whether anything was stored.
    pub fn set_session(&mut self, key: &str, value: &str) -> bool {
        if key.is_empty() || value.is_empty() {
            return false;
        }
        tracing::debug!(%key, "Session storage entry set");
        self.session.set_item(key, value);
        true
    }

    /// Store a local entry. Returns whether anything was stored.
    pub fn set_local(&mut self, key: &str, value: &str) -> bool {
        if key.is_empty() || value.is_empty() {
            return false;
        }
        tracing::debug!(%key, "Local storage entry set");
        self.local.set_item(key, value);
        true
    }

    /// Set a cookie expiring `expiry_minutes` from now, or
    /// [`DEFAULT_COOKIE_EXPIRY_MINUTES`] when `None`. Returns whether
    /// anything was stored.
    pub fn set_cookie(&mut self, key: &str, value: &str, expiry_minutes: Option<u32>) -> bool {
        if key.is_empty() || value.is_empty() {
            return false;
        }
        let minutes = expiry_minutes.unwrap_or(DEFAULT_COOKIE_EXPIRY_MINUTES);
        let now = self.clock.now();
        let expires_at = now + Duration::minutes(i64::from(minutes));
        tracing::debug!(%key, expires = %gmt_string(expires_at), "Cookie set");
        self.cookies.purge_expired(now);
        self.cookies.set(key, value, expires_at);
        true
    }

    /// Render every storage kind.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if an area cannot be rendered.
    pub fn snapshot(&self) -> Result<StorageSnapshot, StorageError> {
        let now = self.clock.now();

        let cookies: String = self
            .cookies
            .live(now)
            .map(|cookie| {
                format!(
                    "{}: {}\nExpiry: {}\n\n",
                    cookie.name,
                    cookie.value,
                    gmt_string(cookie.expires_at)
                )
            })
            .collect();

        Ok(StorageSnapshot {
            session: self.session.to_pretty_json()?,
            local: self.local.to_pretty_json()?,
            cookies,
            gmt_time: gmt_string(now),
        })
    }

    /// Clear session storage, local storage and cookies.
    pub fn reset_all(&mut self) {
        tracing::info!(
            session = self.session.len(),
            local = self.local.len(),
            cookies = self.cookies.len(),
            "Resetting all storage"
        );
        self.local.clear();
        self.session.clear();
        self.cookies.expire_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_gmt_string() {
        assert_eq!(
            gmt_string(DateTime::<Utc>::UNIX_EPOCH),
            "Thu, 01 Jan 1970 00:00:00 GMT"
        );
        let time = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(gmt_string(time), "Sun, 09 Mar 2025 14:05:07 GMT");
    }
}
