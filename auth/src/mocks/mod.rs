//! Mock gateway implementations for testing.
//!
//! In-memory stand-ins for the network collaborators, for use in unit and
//! integration tests.

pub mod gateway;

pub use gateway::MockAuthGateway;
