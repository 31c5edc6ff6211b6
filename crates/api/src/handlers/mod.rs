//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `taskhub_db` (or the
//! enrichment service) and map errors via [`AppError`](crate::error::AppError).

pub mod project;
pub mod task;
