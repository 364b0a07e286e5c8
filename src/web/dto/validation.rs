//! Request-body validation for the Web API.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// JSON extractor that runs the DTO's `validator` rules after deserializing.
///
/// Handlers written against `ValidatedJson<T>` only ever see payloads that
/// passed both parsing and field validation. A body that is not valid JSON
/// maps to a 400, a body that parses but breaks a rule maps to the
/// field-level validation envelope.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Malformed JSON body: {e}")))?;

        payload
            .validate()
            .map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(payload))
    }
}

/// Rejects strings that are empty or whitespace-only.
///
/// Used on post titles and bodies, where `length(min = 1)` alone would let
/// a bare space through.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}
