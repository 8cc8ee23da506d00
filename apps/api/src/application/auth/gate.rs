use super::token::TokenService;
use crate::domain::{
    shared::errors::DomainError,
    user::{entity::User, repository::UserRepository},
};
use std::sync::Arc;
use tracing::debug;

/// Pulls the token out of an `Authorization` header value.
///
/// Absent header or empty token is [`DomainError::NoCredential`]; any scheme
/// other than `Bearer` is [`DomainError::InvalidCredential`].
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, DomainError> {
    let value = authorization.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(DomainError::NoCredential);
    }

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(DomainError::InvalidCredential(
            "Unsupported authorization scheme".into(),
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(DomainError::NoCredential);
    }
    Ok(token)
}

/// Resolves a bearer credential to a stored user.
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserRepository>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    pub async fn resolve(&self, authorization: Option<&str>) -> Result<User, DomainError> {
        let token = bearer_token(authorization)?;
        let claims = self.tokens.verify(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))?;
        debug!(user_id = %user.id, "credential resolved");
        Ok(user)
    }
}
