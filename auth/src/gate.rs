//! Route gate: login surface vs. application shell.
//!
//! Which surface shows is a pure function of `is_authenticated`. The
//! [`RouteGate`] keeps that choice current by selecting on the auth store and
//! tells a [`Navigator`] where to go when the answer flips.

use crate::constants::LOGIN_ROUTE;
use crate::selectors;
use crate::{AuthGateway, AuthStore};
use std::sync::{Arc, Mutex, PoisonError};
use userdesk_runtime::Subscription;

/// Top-level surface of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The login form.
    Login,
    /// Navigation plus page content.
    Shell,
}

/// Surface to render for the given authentication status.
#[must_use]
pub const fn surface_for(is_authenticated: bool) -> Surface {
    if is_authenticated {
        Surface::Shell
    } else {
        Surface::Login
    }
}

/// Something that can switch routes.
pub trait Navigator: Send + Sync {
    /// Show `route`.
    fn navigate(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, route: &str) {
        self(route);
    }
}

/// Keeps the visible surface in step with the auth store.
///
/// On a signed-out to signed-in edge the navigator is sent to the landing
/// route; on the reverse edge it is sent back to the login route. The status
/// at attach time only sets the surface. Dropping the gate stops it.
#[derive(Debug)]
pub struct RouteGate {
    surface: Arc<Mutex<Surface>>,
    subscription: Subscription,
}

impl RouteGate {
    /// Start gating on `store`.
    pub async fn attach<G, N>(store: &AuthStore<G>, landing_route: impl Into<String>, navigator: N) -> Self
    where
        G: AuthGateway + Clone + 'static,
        N: Navigator + 'static,
    {
        let landing_route = landing_route.into();
        let surface = Arc::new(Mutex::new(Surface::Login));
        let previous: Mutex<Option<bool>> = Mutex::new(None);

        let subscription = {
            let surface = Arc::clone(&surface);
            store
                .select(selectors::is_authenticated, move |authenticated: &bool| {
                    let authenticated = *authenticated;
                    *surface.lock().unwrap_or_else(PoisonError::into_inner) =
                        surface_for(authenticated);

                    let before = previous
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .replace(authenticated);

                    match (before, authenticated) {
                        (Some(false), true) => {
                            tracing::debug!(route = %landing_route, "Signed in, entering shell");
                            navigator.navigate(&landing_route);
                        },
                        (Some(true), false) => {
                            tracing::debug!("Signed out, back to login");
                            navigator.navigate(LOGIN_ROUTE);
                        },
                        _ => {},
                    }
                })
                .await
        };

        Self {
            surface,
            subscription,
        }
    }

    /// Surface that should be on screen now.
    #[must_use]
    pub fn surface(&self) -> Surface {
        *self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the gate still follows the store.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_for() {
        assert_eq!(surface_for(false), Surface::Login);
        assert_eq!(surface_for(true), Surface::Shell);
    }

    #[test]
    fn test_closure_navigator() {
        let visited = Mutex::new(Vec::new());
        let navigator = |route: &str| visited.lock().unwrap().push(route.to_string());

        navigator.navigate("/welcome");

        assert_eq!(*visited.lock().unwrap(), vec!["/welcome".to_string()]);
    }
}
