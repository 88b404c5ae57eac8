//! JWT token provider for creating and validating tokens.

use super::{Claims, TokenSubject, TokenType};
use campusbay_config::SecurityConfig;
use campusbay_core::{CampusBayError, CampusBayResult, Interface};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// Token pair containing access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: i64,
    /// Seconds until the access token expires.
    pub expires_in: i64,
    /// Token type (always "Bearer").
    pub token_type: String,
}

/// Issues and validates tokens.
pub trait TokenProviderInterface: Interface {
    /// Issues a new access/refresh pair.
    fn generate_tokens(&self, subject: TokenSubject<'_>) -> CampusBayResult<TokenPair>;

    /// Validates an access token and returns its claims.
    fn validate_access_token(&self, token: &str) -> CampusBayResult<Claims>;

    /// Validates a refresh token and returns its claims.
    fn validate_refresh_token(&self, token: &str) -> CampusBayResult<Claims>;

    /// Exchanges a refresh token for a new pair.
    fn refresh_tokens(&self, refresh_token: &str) -> CampusBayResult<TokenPair>;
}

/// JWT token provider service.
#[derive(Component, Clone)]
#[shaku(interface = TokenProviderInterface)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Builds the shaku parameters for this component.
    #[must_use]
    pub fn parameters(config: Arc<SecurityConfig>) -> TokenProviderParameters {
        let provider = Self::new(config);
        TokenProviderParameters {
            encoding_key: provider.encoding_key,
            decoding_key: provider.decoding_key,
            config: provider.config,
            validation: provider.validation,
        }
    }

    fn issue(
        &self,
        subject: TokenSubject<'_>,
        token_type: TokenType,
        lifetime_secs: u64,
        session_id: &str,
    ) -> CampusBayResult<(String, i64)> {
        let lifetime = Duration::seconds(i64::try_from(lifetime_secs).unwrap_or(i64::MAX / 1000));
        let expires_at = Utc::now() + lifetime;

        let claims = Claims::new(
            subject,
            token_type,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
            session_id.to_string(),
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            CampusBayError::Internal(format!("Failed to generate {token_type} token: {e}"))
        })?;

        debug!("Generated {} token for user {}", token_type, subject.user_id);
        Ok((token, expires_at.timestamp()))
    }

    /// Validates a token of any type and returns the claims.
    pub fn validate_token(&self, token: &str) -> CampusBayResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => CampusBayError::TokenExpired,
                    ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                        CampusBayError::InvalidToken("Invalid token signature".to_string())
                    }
                    ErrorKind::InvalidIssuer => {
                        CampusBayError::InvalidToken("Invalid token issuer".to_string())
                    }
                    ErrorKind::InvalidAudience => {
                        CampusBayError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => CampusBayError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

impl TokenProviderInterface for TokenProvider {
    fn generate_tokens(&self, subject: TokenSubject<'_>) -> CampusBayResult<TokenPair> {
        let session_id = uuid::Uuid::now_v7().to_string();

        let (access_token, access_expires_at) = self.issue(
            subject,
            TokenType::Access,
            self.config.jwt_access_expiration_secs,
            &session_id,
        )?;
        let (refresh_token, _) = self.issue(
            subject,
            TokenType::Refresh,
            self.config.jwt_refresh_expiration_secs,
            &session_id,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            expires_in: access_expires_at - Utc::now().timestamp(),
            token_type: "Bearer".to_string(),
        })
    }

    fn validate_access_token(&self, token: &str) -> CampusBayResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_access_token() {
            return Err(CampusBayError::InvalidToken("Expected access token".to_string()));
        }

        Ok(claims)
    }

    fn validate_refresh_token(&self, token: &str) -> CampusBayResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_refresh_token() {
            return Err(CampusBayError::InvalidToken("Expected refresh token".to_string()));
        }

        Ok(claims)
    }

    fn refresh_tokens(&self, refresh_token: &str) -> CampusBayResult<TokenPair> {
        let claims = self.validate_refresh_token(refresh_token)?;
        self.generate_tokens(claims.subject())
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
