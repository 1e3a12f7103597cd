//! Mock directory implementations for testing.

pub mod api;

pub use api::MockDirectoryApi;
