//! Domain types shared by the taskhub crates.
//!
//! Nothing in here touches the network or the database: error taxonomy,
//! primitive type aliases, the task status enum, repository summaries,
//! partial-update deserializers and the field-level validation rules
//! applied to incoming payloads.

pub mod error;
pub mod github;
pub mod patch;
pub mod task_status;
pub mod types;
pub mod validation;
