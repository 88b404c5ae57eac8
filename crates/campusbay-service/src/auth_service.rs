//! Authentication service trait definition.

use crate::dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserResponse};
use async_trait::async_trait;
use campusbay_core::{CampusBayResult, Interface, UserId};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Registers a new user and signs them in.
    async fn register(&self, request: RegisterRequest) -> CampusBayResult<AuthResponse>;

    /// Logs in with email and password.
    async fn login(&self, request: LoginRequest) -> CampusBayResult<AuthResponse>;

    /// Exchanges a refresh token for a new token pair.
    async fn refresh_token(&self, request: RefreshTokenRequest) -> CampusBayResult<AuthResponse>;

    /// Gets the profile of the authenticated user.
    async fn current_user(&self, user_id: UserId) -> CampusBayResult<UserResponse>;
}
