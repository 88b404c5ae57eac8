//! Authentication middleware.

use campusbay_core::CampusBayError;
use campusbay_security::TokenProviderInterface;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthMiddlewareState {
    #[must_use]
    pub fn new(token_provider: Arc<dyn TokenProviderInterface>) -> Self {
        Self { token_provider }
    }
}

/// Why a presented bearer token was not accepted.
///
/// Stored in request extensions so protected handlers can answer with the
/// precise reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Expired,
    Invalid,
}

impl From<TokenRejection> for CampusBayError {
    fn from(rejection: TokenRejection) -> Self {
        match rejection {
            TokenRejection::Expired => Self::TokenExpired,
            TokenRejection::Invalid => Self::InvalidToken("Invalid or expired token".to_string()),
        }
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
pub(crate) fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Authentication middleware that validates JWT access tokens.
///
/// Valid claims are added to the request extensions. Public routes pass
/// through untouched; handlers that need a user reject the request through
/// the `AuthenticatedUser` extractor.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(ToString::to_string);

    if let Some(token) = token {
        match state.token_provider.validate_access_token(&token) {
            Ok(claims) => {
                debug!("Authenticated user: {}", claims.user_id());
                request.extensions_mut().insert(claims);
            }
            Err(e) => {
                debug!("Token validation failed: {}", e);
                let rejection = if matches!(e, CampusBayError::TokenExpired) {
                    TokenRejection::Expired
                } else {
                    TokenRejection::Invalid
                };
                request.extensions_mut().insert(rejection);
            }
        }
    }

    next.run(request).await
}
