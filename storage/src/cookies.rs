//! Cookie jar.

use chrono::{DateTime, Utc};

/// One cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// When the cookie stops being sent.
    pub expires_at: DateTime<Utc>,
}

impl Cookie {
    /// Whether the cookie is still live at `now`.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Cookies with absolute expiry, in the order they were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    /// An empty jar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cookies: Vec::new(),
        }
    }

    /// Set a cookie, replacing any cookie with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>, expires_at: DateTime<Utc>) {
        let cookie = Cookie {
            name: name.into(),
            value: value.into(),
            expires_at,
        };
        match self.cookies.iter_mut().find(|c| c.name == cookie.name) {
            Some(existing) => *existing = cookie,
            None => self.cookies.push(cookie),
        }
    }

    /// Live cookie named `name`.
    #[must_use]
    pub fn get(&self, name: &str, now: DateTime<Utc>) -> Option<&Cookie> {
        self.cookies
            .iter()
            .find(|c| c.name == name && c.is_live(now))
    }

    /// Cookies still live at `now`.
    pub fn live(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter().filter(move |c| c.is_live(now))
    }

    /// Drop cookies that have expired by `now`.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) {
        self.cookies.retain(|c| c.is_live(now));
    }

    /// Expire every cookie.
    pub fn expire_all(&mut self) {
        self.cookies.clear();
    }

    /// Number of cookies held, live or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the jar holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use userdesk_core::environment::Clock;
    use userdesk_testing::test_clock;

    #[test]
    fn test_live_filters_expired() {
        let now = test_clock().now();
        let mut jar = CookieJar::new();
        jar.set("session", "abc", now + Duration::minutes(5));
        jar.set("stale", "old", now - Duration::seconds(1));
        jar.set("edge", "x", now);

        let live: Vec<&str> = jar.live(now).map(|c| c.name.as_str()).collect();
        assert_eq!(live, vec!["session"]);
        assert!(jar.get("stale", now).is_none());
        assert_eq!(jar.get("session", now).map(|c| c.value.as_str()), Some("abc"));

        jar.purge_expired(now);
        assert_eq!(jar.len(), 1);
    }

    #[test]
    fn test_set_replaces_by_name() {
        let now = test_clock().now();
        let mut jar = CookieJar::new();
        jar.set("a", "1", now + Duration::minutes(1));
        jar.set("b", "2", now + Duration::minutes(1));
        jar.set("a", "3", now + Duration::minutes(2));

        let names: Vec<(&str, &str)> = jar
            .live(now)
            .map(|c| (c.name.as_str(), c.value.as_str()))
            .collect();
        assert_eq!(names, vec![("a", "3"), ("b", "2")]);

        jar.expire_all();
        assert!(jar.is_empty());
    }
}
