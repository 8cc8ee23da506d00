use super::dto::{CreateRecipeRequest, ImageUpload, RecipeListQuery, non_blank};
use crate::{
    domain::{
        recipe::{
            entity::{Ingredients, NewRecipe, Recipe},
            repository::RecipeRepository,
        },
        shared::{
            errors::DomainError,
            pagination::{PaginatedResponse, PaginationRequest},
        },
    },
    infrastructure::storage::{local_storage::storage_key, traits::StorageService},
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Creating and browsing recipes.
pub struct RecipeCatalogUseCase {
    recipes: Arc<dyn RecipeRepository>,
    storage: Arc<dyn StorageService>,
    max_images: usize,
}

impl RecipeCatalogUseCase {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        storage: Arc<dyn StorageService>,
        max_images: usize,
    ) -> Self {
        Self {
            recipes,
            storage,
            max_images,
        }
    }

    /// Stores the images, then the recipe. Images already stored are removed
    /// again if a later step fails.
    #[instrument(skip(self, request), fields(images = request.images.len()))]
    pub async fn create(&self, request: CreateRecipeRequest) -> Result<Recipe, DomainError> {
        let request = CreateRecipeRequest {
            title: request.title.trim().to_string(),
            ..request
        };
        request.validate()?;

        if request.images.len() > self.max_images {
            return Err(DomainError::ValidationError(format!(
                "At most {} images are allowed",
                self.max_images
            )));
        }
        if let Some(bad) = request
            .images
            .iter()
            .find(|img| !img.content_type.starts_with("image/"))
        {
            return Err(DomainError::ValidationError(format!(
                "Unsupported image type '{}'",
                bad.content_type
            )));
        }

        let mut stored_keys = Vec::with_capacity(request.images.len());
        let mut image_urls = Vec::with_capacity(request.images.len());
        for image in request.images {
            match self.store_image(image).await {
                Ok((key, url)) => {
                    stored_keys.push(key);
                    image_urls.push(url);
                }
                Err(e) => {
                    self.discard(&stored_keys).await;
                    return Err(e);
                }
            }
        }

        let recipe = Recipe::new(NewRecipe {
            title: request.title,
            images: image_urls,
            ingredients: Ingredients::from_form_values(request.ingredients),
            cook_time: non_blank(request.cook_time),
            ethnicity: non_blank(request.ethnicity),
        });

        match self.recipes.create(&recipe).await {
            Ok(created) => {
                info!(recipe_id = %created.id, "recipe created");
                Ok(created)
            }
            Err(e) => {
                self.discard(&stored_keys).await;
                Err(e)
            }
        }
    }

    pub async fn list(&self, query: RecipeListQuery) -> Result<PaginatedResponse<Recipe>, DomainError> {
        let page = PaginationRequest::clamped(query.limit, query.offset);
        let items = self
            .recipes
            .find_all(page, non_blank(query.ethnicity))
            .await?;
        Ok(PaginatedResponse {
            items,
            limit: page.limit,
            offset: page.offset,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<Recipe, DomainError> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Recipe not found".into()))
    }

    async fn store_image(&self, image: ImageUpload) -> Result<(String, String), DomainError> {
        let key = storage_key(image.file_name.as_deref());
        let url = self
            .storage
            .upload(&key, image.data.to_vec(), &image.content_type)
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "image upload failed");
                DomainError::storage(e)
            })?;
        Ok((key, url))
    }

    async fn discard(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.storage.delete(key).await {
                warn!(key = %key, error = %e, "failed to remove orphaned image");
            }
        }
    }
}
