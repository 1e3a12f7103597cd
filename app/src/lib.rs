//! # Userdesk
//!
//! Application shell for the Userdesk client: configuration, the static
//! route table, the side menu and a text console that drives every page.
//!
//! The `userdesk` binary wires these to the HTTP gateways; tests wire them
//! to the in-memory mocks.

pub mod command;
pub mod config;
pub mod console;
pub mod menu;
pub mod routes;
pub mod shell;

pub use command::{Command, CommandError};
pub use config::{AppConfig, ConfigError, Environment};
pub use console::{Console, ConsoleConfig, Step};
pub use menu::{MenuGroup, MenuItem, SideMenu};
pub use routes::{Resolution, Route, resolve, route_for};
pub use shell::Shell;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "userdesk=info,userdesk_auth=debug,userdesk_runtime=info";
