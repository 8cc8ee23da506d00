//! HTTP error handling and response conversion.
//!
//! Domain failures are mapped onto a small set of HTTP-facing variants. Store
//! failures stay distinct from authentication failures all the way to the
//! status code: a broken database is a 500, never a 401.

use crate::domain::shared::errors::DomainError;
use axum::{
    Json,
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// Request rejected, including duplicate likes (400).
    BadRequest(String),

    /// Missing or unverifiable credential (401).
    Unauthorized(String),

    /// Request data failed validation (400).
    ValidationError(String),

    /// Store or file operation failed (500).
    Storage(String),

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::ValidationError(msg) => msg.clone(),
            Self::Unauthorized(msg) => msg.clone(),
            Self::Storage(_) => "Storage operation failed".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

// === Domain Error Conversion ===

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NoCredential => AppError::Unauthorized("No token".into()),
            DomainError::InvalidCredential(detail) => {
                tracing::debug!(credential_error = %detail);
                AppError::Unauthorized("Invalid token".into())
            }
            DomainError::InvalidLogin => AppError::Unauthorized("Invalid credentials".into()),
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::AlreadyLiked => AppError::BadRequest("Already liked".into()),
            DomainError::ValidationError(msg) => AppError::ValidationError(msg),
            DomainError::AlreadyExists(msg) => AppError::BadRequest(msg),
            DomainError::StorageError(msg) => {
                tracing::error!(storage_error = %msg);
                AppError::Storage(msg)
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

// === Extractor Rejection Conversion ===

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

// === General Fallback Error Conversion ===

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(anyhow_error = %err, "Unclassified error with chain");
        err.chain().for_each(|cause| {
            tracing::error!(cause = %cause, "Error source");
        });
        AppError::Internal("Operation failed".into())
    }
}
