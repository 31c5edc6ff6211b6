//! Request extractors shared by the handlers.
//!
//! - [`validated_json::ValidatedJson`] -- Parses, trims, validates and escapes a JSON body.
//! - [`path_id::parse_id`] -- Turns a raw path segment into an id, or a 404.

pub mod path_id;
pub mod validated_json;

pub use path_id::parse_id;
pub use validated_json::ValidatedJson;
