use crate::validation::FieldError;

/// Domain-level errors raised below the HTTP layer.
///
/// The API crate translates each variant into a status code in one place;
/// nothing here knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// A third-party service failed. The message is safe to show to clients;
    /// the underlying cause must be logged, not carried here.
    #[error("{0}")]
    ExternalService(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}
