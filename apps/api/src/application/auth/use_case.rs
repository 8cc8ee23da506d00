use super::{
    dto::{AuthResponse, LoginRequest, RegisterRequest, normalize_email},
    token::TokenService,
};
use crate::domain::{
    shared::errors::DomainError,
    user::{entity::User, repository::UserRepository},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Registration and password login.
pub struct AccountUseCase {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl AccountUseCase {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, DomainError> {
        let request = RegisterRequest {
            email: normalize_email(&request.email),
            password: request.password,
        };
        request.validate()?;

        let cost = self.bcrypt_cost;
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .map_err(|e| DomainError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = self
            .users
            .create(&User::with_password(request.email, password_hash))
            .await?;
        info!(user_id = %user.id, "user registered");

        Ok(AuthResponse {
            token: self.tokens.issue(&user)?,
            user: user.profile(),
        })
    }

    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, DomainError> {
        let email = normalize_email(&request.email);
        if email.is_empty() {
            return Err(DomainError::ValidationError("Email is required".into()));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::InvalidLogin)?;
        let Some(hash) = user.password_hash.clone() else {
            warn!(user_id = %user.id, "password login attempted on social-only account");
            return Err(DomainError::InvalidLogin);
        };

        let password = request.password;
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .map_err(|_| DomainError::Internal("Password verification failed".into()))?;
        if !valid {
            return Err(DomainError::InvalidLogin);
        }

        Ok(AuthResponse {
            token: self.tokens.issue(&user)?,
            user: user.profile(),
        })
    }
}
