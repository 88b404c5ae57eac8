//! JWT claims structure.

use campusbay_core::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity a token is issued for.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: UserId,
    pub name: &'a str,
    pub email: &'a str,
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,

    /// User ID as UUID.
    pub user_id: Uuid,

    /// Display name at issue time.
    pub name: String,

    /// User's email.
    pub email: String,

    /// Token type (access or refresh).
    pub token_type: TokenType,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Not before timestamp.
    pub nbf: i64,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,

    /// JWT ID (unique identifier for this token).
    pub jti: String,

    /// Session shared by an access/refresh pair.
    pub session_id: String,
}

impl Claims {
    /// Builds claims of the given type.
    #[must_use]
    pub fn new(
        subject: TokenSubject<'_>,
        token_type: TokenType,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
        session_id: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.user_id.to_string(),
            user_id: subject.user_id.into_inner(),
            name: subject.name.to_string(),
            email: subject.email.to_string(),
            token_type,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
            session_id,
        }
    }

    /// Returns the user ID.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }

    /// The subject these claims were issued for.
    #[must_use]
    pub fn subject(&self) -> TokenSubject<'_> {
        TokenSubject {
            user_id: self.user_id(),
            name: &self.name,
            email: &self.email,
        }
    }

    /// Checks if this is an access token.
    #[must_use]
    pub const fn is_access_token(&self) -> bool {
        matches!(self.token_type, TokenType::Access)
    }

    /// Checks if this is a refresh token.
    #[must_use]
    pub const fn is_refresh_token(&self) -> bool {
        matches!(self.token_type, TokenType::Refresh)
    }
}

/// Token type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token, sent with API requests.
    Access,
    /// Refresh token, exchanged for a new pair.
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(token_type: TokenType, expires_at: DateTime<Utc>) -> Claims {
        let user_id = UserId::new();
        Claims::new(
            TokenSubject {
                user_id,
                name: "Priya Sharma",
                email: "priya@college.edu",
            },
            token_type,
            "issuer".to_string(),
            "audience".to_string(),
            expires_at,
            "session".to_string(),
        )
    }

    #[test]
    fn test_access_token_claims() {
        let claims = claims(TokenType::Access, Utc::now() + Duration::hours(1));
        assert!(claims.is_access_token());
        assert!(!claims.is_refresh_token());
        assert_eq!(claims.sub, claims.user_id().to_string());
        assert_eq!(claims.subject().name, "Priya Sharma");
    }

    #[test]
    fn test_refresh_claims_carry_expiry() {
        let expires_at = Utc::now() + Duration::days(7);
        let claims = claims(TokenType::Refresh, expires_at);
        assert!(claims.is_refresh_token());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_token_type_display() {
        assert_eq!(TokenType::Access.to_string(), "access");
        assert_eq!(TokenType::Refresh.to_string(), "refresh");
    }
}
