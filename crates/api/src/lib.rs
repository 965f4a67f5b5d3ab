//! Helpdesk API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! classifier) so integration tests and the binary entrypoint can both
//! access them.

pub mod classifier;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
