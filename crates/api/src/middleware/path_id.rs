use taskhub_core::error::CoreError;
use taskhub_core::types::DbId;

use crate::error::AppError;

/// Parse a path segment as an entity id.
///
/// Ids are taken as raw strings so that a non-numeric id is reported as a
/// missing `entity` (404) rather than axum's default 400 path rejection.
pub fn parse_id(raw: &str, entity: &'static str) -> Result<DbId, AppError> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::Core(CoreError::not_found(entity)))
}
