//! Authentication constants.
//!
//! Messages here reach the user through `AuthState::error`.

/// Failure message when the gateway gives no usable message.
pub const LOGIN_FAILED: &str = "Login failed";

/// Failure message when no auth gateway is wired into the environment.
pub const GATEWAY_UNAVAILABLE: &str = "Auth service is not available";

/// Form error when the login intent could not be dispatched.
pub const DISPATCH_FAILED: &str = "Failed to process login request";

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://dummyjson.com";

/// Route shown after login.
pub const DEFAULT_LANDING_ROUTE: &str = "/welcome";

/// Route of the login surface.
pub const LOGIN_ROUTE: &str = "/login";
