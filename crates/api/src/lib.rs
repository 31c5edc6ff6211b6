//! taskhub API server library.
//!
//! Exposes the core building blocks (config, state, error handling, cache,
//! enrichment, routes) so integration tests and the binary entrypoint can
//! both access them.

pub mod cache;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
