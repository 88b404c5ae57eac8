//! Authentication service implementation.

use crate::auth_service::AuthService;
use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
use async_trait::async_trait;
use campusbay_config::MarketplaceConfig;
use campusbay_core::{CampusBayError, CampusBayResult, UserId, ValidateExt};
use campusbay_domain::{Email, User};
use campusbay_repository::UserRepository;
use campusbay_security::{PasswordHasherInterface, TokenProviderInterface, TokenSubject};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service component.
#[derive(Component)]
#[shaku(interface = AuthService)]
pub struct AuthServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    token_provider: Arc<dyn TokenProviderInterface>,
    #[shaku(default)]
    marketplace: MarketplaceConfig,
}

impl AuthServiceComponent {
    fn create_auth_response(&self, user: &User) -> CampusBayResult<AuthResponse> {
        let tokens = self.token_provider.generate_tokens(TokenSubject {
            user_id: user.id,
            name: &user.name,
            email: user.email.as_str(),
        })?;

        Ok(AuthResponse {
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            user: UserResponse::from(user),
        })
    }
}

#[async_trait]
impl AuthService for AuthServiceComponent {
    async fn register(&self, request: RegisterRequest) -> CampusBayResult<AuthResponse> {
        debug!("Registering user: {}", request.email);

        request.validate_request()?;

        let email =
            Email::new(&request.email).map_err(|e| CampusBayError::Validation(e.to_string()))?;

        if self.user_repository.exists_by_email(&email).await? {
            return Err(CampusBayError::conflict("Email already registered"));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;

        let user = User::register(
            request.name,
            email,
            password_hash,
            request.college,
            &self.marketplace.allowed_college_domain,
        );

        // The unique index still guards against a concurrent registration.
        let saved_user = self.user_repository.save(&user).await?;

        info!("User registered: {} (verified: {})", saved_user.id, saved_user.verified);
        self.create_auth_response(&saved_user)
    }

    async fn login(&self, request: LoginRequest) -> CampusBayResult<AuthResponse> {
        debug!("Login attempt for: {}", request.email);

        request.validate_request()?;

        let Ok(email) = Email::new(&request.email) else {
            warn!("Login failed: malformed email - {}", request.email);
            return Err(CampusBayError::InvalidCredentials);
        };

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found - {}", email);
                CampusBayError::InvalidCredentials
            })?;

        if !self.password_hasher.verify(&request.password, &user.password_hash)? {
            warn!("Login failed: invalid password - {}", user.id);
            return Err(CampusBayError::InvalidCredentials);
        }

        info!("User logged in: {}", user.id);
        self.create_auth_response(&user)
    }

    async fn refresh_token(&self, request: RefreshTokenRequest) -> CampusBayResult<AuthResponse> {
        debug!("Refreshing token");

        request.validate_request()?;

        let claims = self.token_provider.validate_refresh_token(&request.refresh_token)?;

        // Reissue from the stored user so name changes and deletions are honoured.
        let user = self
            .user_repository
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| {
                warn!("Refresh rejected: user {} no longer exists", claims.user_id());
                CampusBayError::InvalidToken("User no longer exists".to_string())
            })?;

        info!("Token refreshed for user: {}", user.id);
        self.create_auth_response(&user)
    }

    async fn current_user(&self, user_id: UserId) -> CampusBayResult<UserResponse> {
        debug!("Getting current user: {}", user_id);

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CampusBayError::not_found("User", user_id))?;

        Ok(UserResponse::from(user))
    }
}

impl std::fmt::Debug for AuthServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceComponent").finish_non_exhaustive()
    }
}
