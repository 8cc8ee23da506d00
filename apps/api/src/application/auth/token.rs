use crate::domain::{shared::errors::DomainError, user::entity::User};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

impl UserClaims {
    pub fn user_id(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| DomainError::InvalidCredential("Invalid token subject".into()))
    }
}

/// Issues and verifies HS256 bearer credentials.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp().max(0) as usize,
            exp: (now + self.ttl).timestamp().max(0) as usize,
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &UserClaims) -> Result<String, DomainError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| DomainError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Rejects malformed, expired, and wrongly signed tokens alike.
    pub fn verify(&self, token: &str) -> Result<UserClaims, DomainError> {
        decode::<UserClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::InvalidCredential(e.to_string()))
    }
}
