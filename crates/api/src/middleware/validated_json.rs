//! JSON body extractor that runs the sanitize/validate pipeline.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use taskhub_core::error::CoreError;
use taskhub_core::validation::{field_errors, Sanitize};
use validator::Validate;

use crate::error::AppError;

/// A JSON body that has been trimmed, validated and HTML-escaped.
///
/// Any body rejection (malformed JSON, wrong field types, missing
/// `Content-Type`) becomes a 400 before the handler runs; rule failures
/// become a 400 carrying the per-field messages.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProject>) -> AppResult<..> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Sanitize + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.trim();
        value
            .validate()
            .map_err(|errors| CoreError::Validation(field_errors(&errors)))?;
        value.escape();

        Ok(Self(value))
    }
}
