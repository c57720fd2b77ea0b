//! cerebra-server library root.
//!
//! Re-exports internal modules so that the binary and integration tests
//! share one router and state.

pub mod config;
pub mod error;
pub mod middleware;
pub mod page;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod telemetry;
