//! JWT claims extractor.

use crate::middleware::TokenRejection;
use crate::responses::AppError;
use campusbay_core::{CampusBayError, UserId};
use campusbay_security::Claims;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Extractor for the authenticated caller.
///
/// Relies on `auth_middleware` having validated the bearer token.
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.0.user_id()
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(Self(claims.clone()));
        }

        let error = match parts.extensions.get::<TokenRejection>() {
            Some(rejection) => CampusBayError::from(*rejection),
            None => CampusBayError::Unauthorized("Authentication required".to_string()),
        };
        Err(AppError(error))
    }
}
