//! Static route table.
//!
//! Paths are matched segment by segment with no wildcards beyond the
//! numeric user id.

use std::fmt;

/// Where the empty path sends the user.
pub const HOME_ROUTE: &str = "/welcome";

/// A page of the shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Greeting page.
    Welcome,
    /// Searchable user table.
    UserList,
    /// One user, by id.
    UserDetail(u64),
    /// Storage inspector.
    Storage,
    /// Any unmatched path.
    NotFound(String),
}

/// Outcome of matching a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Go to another path instead.
    Redirect(&'static str),
    /// Show this page.
    Page(Route),
}

impl Route {
    /// Canonical path of this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Welcome => "/welcome".to_string(),
            Self::UserList => "/user-list".to_string(),
            Self::UserDetail(id) => format!("/user-detail/{id}"),
            Self::Storage => "/storage".to_string(),
            Self::NotFound(path) => format!("/{path}"),
        }
    }

    /// Page title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::UserList => "List of Users",
            Self::UserDetail(_) => "User Detail",
            Self::Storage => "Storage",
            Self::NotFound(_) => "404",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Match `path` against the route table.
///
/// Leading and trailing slashes are ignored.
#[must_use]
pub fn resolve(path: &str) -> Resolution {
    let trimmed = path.trim_matches('/');
    let segments: Vec<&str> = trimmed.split('/').collect();

    let route = match segments.as_slice() {
        [""] => return Resolution::Redirect(HOME_ROUTE),
        ["welcome"] => Route::Welcome,
        ["user-list"] => Route::UserList,
        ["user-detail", id] => match id.parse::<u64>() {
            Ok(id) => Route::UserDetail(id),
            Err(_) => Route::NotFound(trimmed.to_string()),
        },
        ["storage"] => Route::Storage,
        _ => Route::NotFound(trimmed.to_string()),
    };

    Resolution::Page(route)
}

/// Match `path`, following redirects.
#[must_use]
pub fn route_for(path: &str) -> Route {
    let mut current = path;
    // The table has no redirect chains, but a bad table must not loop
    for _ in 0..4 {
        match resolve(current) {
            Resolution::Page(route) => return route,
            Resolution::Redirect(target) => current = target,
        }
    }
    Route::NotFound(path.trim_matches('/').to_string())
}
