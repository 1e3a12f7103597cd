//! # Userdesk Storage
//!
//! Developer-facing view of client storage: session storage, local storage
//! and cookies, all held in memory.
//!
//! ```
//! use userdesk_core::environment::SystemClock;
//! use userdesk_storage::StorageInspector;
//!
//! let mut inspector = StorageInspector::new(SystemClock);
//! inspector.set_session("theme", "dark");
//! inspector.set_cookie("visited", "yes", None);
//!
//! let snapshot = inspector.snapshot().unwrap();
//! assert!(snapshot.session.contains("\"theme\": \"dark\""));
//! assert!(snapshot.cookies.starts_with("visited: yes\nExpiry: "));
//! ```

pub mod area;
pub mod cookies;
pub mod error;
pub mod inspector;

pub use area::StorageArea;
pub use cookies::{Cookie, CookieJar};
pub use error::StorageError;
pub use inspector::{DEFAULT_COOKIE_EXPIRY_MINUTES, StorageInspector, StorageSnapshot, gmt_string};
