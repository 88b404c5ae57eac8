//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the body and runs `validator` rules on it.
//! Both malformed JSON and rule violations are answered with 400 in the
//! standard error envelope; rule violations carry field-level details.

use crate::responses::error_response;
use campusbay_core::{field_errors, validation_errors_to_error, ErrorResponse};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor that automatically validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// async fn create_item(ValidatedJson(request): ValidatedJson<CreateItemRequest>) {
///     // request satisfies its validation rules here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let error = match self {
            Self::JsonError(rejection) => ErrorResponse {
                code: "INVALID_JSON".to_string(),
                message: format!("Invalid JSON: {}", rejection.body_text()),
                details: None,
            },
            Self::ValidationError(errors) => {
                let details = field_errors(&errors);
                let error = validation_errors_to_error(errors);
                ErrorResponse::from_error(&error).with_details(details)
            }
        };
        error_response(StatusCode::BAD_REQUEST, error)
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}
