//! Serde helpers for partial-update payloads.
//!
//! A JSON field can be absent, `null`, or a value. Update DTOs pair these
//! functions with `#[serde(default)]` so the three cases stay distinct.

use serde::{Deserialize, Deserializer};

/// A string field where `null` reads as `""`, so the blank-value rules
/// report it instead of a type error.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional string field: absent stays `None`, `null` becomes `Some("")`.
pub fn present_null_as_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    null_as_empty(deserializer).map(Some)
}

/// Clearable field: absent stays `None`, `null` becomes `Some(None)`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
