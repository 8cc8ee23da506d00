use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use uuid::Uuid;

use crate::{
    application::like_recipe::{dto::LikeCountResponse, use_case::LikeRecipeUseCase},
    domain::like::repository::ReconcileReport,
    presentation::http::{
        errors::AppError, middleware::user::resolve_required_user, state::AppState,
    },
};

fn parse_recipe_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Recipe not found".into()))
}

pub async fn like_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<LikeCountResponse>, AppError> {
    let user = resolve_required_user(&state, &headers).await?;
    let recipe_id = parse_recipe_id(&id)?;
    let result = LikeRecipeUseCase::new(state.like_repo.clone())
        .like(recipe_id, &user)
        .await?;
    Ok(Json(result))
}

pub async fn unlike_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<LikeCountResponse>, AppError> {
    let user = resolve_required_user(&state, &headers).await?;
    let recipe_id = parse_recipe_id(&id)?;
    let result = LikeRecipeUseCase::new(state.like_repo.clone())
        .unlike(recipe_id, &user)
        .await?;
    Ok(Json(result))
}

pub async fn reconcile_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ReconcileReport>, AppError> {
    let user = resolve_required_user(&state, &headers).await?;
    let recipe_id = parse_recipe_id(&id)?;
    tracing::info!(user_id = %user.id, %recipe_id, "reconcile requested");
    let report = LikeRecipeUseCase::new(state.like_repo.clone())
        .reconcile(recipe_id)
        .await?;
    Ok(Json(report))
}
