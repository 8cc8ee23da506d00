use axum::{
    Json,
    extract::{Multipart, Path, Query, State, multipart::MultipartRejection},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    application::recipes::{
        dto::{CreateRecipeRequest, ImageUpload, RecipeListQuery},
        use_case::RecipeCatalogUseCase,
    },
    domain::{recipe::entity::Recipe, shared::pagination::PaginatedResponse},
    presentation::http::{errors::AppError, state::AppState},
};

fn catalog(state: &AppState) -> RecipeCatalogUseCase {
    RecipeCatalogUseCase::new(
        state.recipe_repo.clone(),
        state.storage.clone(),
        state.config.max_images_per_recipe,
    )
}

pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<PaginatedResponse<Recipe>>, AppError> {
    Ok(Json(catalog(&state).list(query).await?))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound("Recipe not found".into()))?;
    Ok(Json(catalog(&state).get(id).await?))
}

/// Multipart fields: `title`, `ingredients` (repeatable), `cookTime`,
/// `ethnicity`, and `images` file parts.
pub async fn create_recipe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Recipe>), AppError> {
    let mut multipart = multipart?;
    let mut request = CreateRecipeRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "images" | "images[]" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::BadRequest("Failed to read image".into()))?;
                request.images.push(ImageUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            "title" => request.title = read_text(field).await?,
            "ingredients" | "ingredients[]" => request.ingredients.push(read_text(field).await?),
            "cookTime" | "cook_time" => request.cook_time = Some(read_text(field).await?),
            "ethnicity" => request.ethnicity = Some(read_text(field).await?),
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    let recipe = catalog(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|_| AppError::BadRequest("Invalid form field".into()))
}
