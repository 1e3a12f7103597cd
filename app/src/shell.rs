//! Application shell: the current page behind the side menu.

use crate::menu::SideMenu;
use crate::routes::{Route, route_for};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use userdesk_auth::Navigator;
use userdesk_auth::constants::LOGIN_ROUTE;

#[derive(Debug)]
struct ShellState {
    route: Route,
    history: Vec<Route>,
}

/// Holds the page currently shown.
///
/// Clones share the same page, so one clone can be handed to a
/// [`RouteGate`](userdesk_auth::RouteGate) while another is read.
#[derive(Debug, Clone)]
pub struct Shell {
    state: Arc<Mutex<ShellState>>,
    menu: SideMenu,
}

impl Shell {
    /// A shell on the home page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ShellState {
                route: route_for(""),
                history: Vec::new(),
            })),
            menu: SideMenu::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ShellState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Page shown now.
    #[must_use]
    pub fn current(&self) -> Route {
        self.lock().route.clone()
    }

    /// Pages visited since the last sign-in, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.lock().history.clone()
    }

    /// The side menu.
    #[must_use]
    pub const fn menu(&self) -> &SideMenu {
        &self.menu
    }

    /// Mutable side menu.
    pub const fn menu_mut(&mut self) -> &mut SideMenu {
        &mut self.menu
    }

    /// Show the page for `path`.
    pub fn go(&self, path: &str) -> Route {
        let route = route_for(path);
        let mut state = self.lock();
        if state.route != route {
            let previous = std::mem::replace(&mut state.route, route.clone());
            state.history.push(previous);
        }
        tracing::debug!(%route, "Route changed");
        route
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for Shell {
    fn navigate(&self, route: &str) {
        if route == LOGIN_ROUTE {
            // The login surface replaces the shell; start over next time
            let mut state = self.lock();
            state.route = route_for("");
            state.history.clear();
            return;
        }
        self.go(route);
    }
}
