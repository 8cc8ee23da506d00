use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No credential provided")]
    NoCredential,
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
    /// Unknown email, wrong password, or an account without a password.
    #[error("Invalid credentials")]
    InvalidLogin,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already liked")]
    AlreadyLiked,
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn storage<E: std::fmt::Display>(err: E) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errs: validator::ValidationErrors) -> Self {
        Self::ValidationError(errs.to_string())
    }
}
