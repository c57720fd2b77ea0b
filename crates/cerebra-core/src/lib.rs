//! cerebra-core
//!
//! Pure domain types and the per-session report lifecycle.
//! No rendering or HTTP dependency — this is the shared vocabulary of Cerebra.

pub mod error;
pub mod models;
pub mod session;
