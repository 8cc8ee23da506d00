use axum::http::{HeaderMap, header};

use crate::{
    domain::user::entity::User,
    presentation::http::{errors::AppError, state::AppState},
};

pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Resolves the request's bearer credential to a stored user.
pub async fn resolve_required_user(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    Ok(state
        .auth_gate()
        .resolve(authorization_header(headers))
        .await?)
}
