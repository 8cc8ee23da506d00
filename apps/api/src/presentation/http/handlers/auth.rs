use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};

use crate::{
    application::auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        use_case::AccountUseCase,
    },
    domain::user::entity::UserProfile,
    presentation::http::{
        errors::AppError, middleware::user::resolve_required_user, state::AppState,
    },
};

fn accounts(state: &AppState) -> AccountUseCase {
    AccountUseCase::new(
        state.user_repo.clone(),
        state.tokens.clone(),
        state.config.bcrypt_cost,
    )
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(body) = body?;
    Ok(Json(accounts(&state).register(body).await?))
}

pub async fn login_user(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(body) = body?;
    Ok(Json(accounts(&state).login(body).await?))
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, AppError> {
    let user = resolve_required_user(&state, &headers).await?;
    Ok(Json(user.profile()))
}
