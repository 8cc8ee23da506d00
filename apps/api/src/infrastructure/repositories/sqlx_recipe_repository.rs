use crate::domain::{
    recipe::{
        entity::{Ingredients, Recipe},
        repository::RecipeRepository,
    },
    shared::{errors::DomainError, pagination::PaginationRequest},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub(crate) const RECIPE_COLUMNS: &str =
    "id, title, images, ingredients, cook_time, ethnicity, likes, liked_by, created_at";

#[derive(FromRow)]
pub(crate) struct RecipeRow {
    id: Uuid,
    title: String,
    images: Vec<String>,
    ingredients: Json<Ingredients>,
    cook_time: Option<String>,
    ethnicity: Option<String>,
    likes: i64,
    liked_by: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(r: RecipeRow) -> Self {
        Recipe {
            id: r.id,
            title: r.title,
            images: r.images,
            ingredients: r.ingredients.0,
            cook_time: r.cook_time,
            ethnicity: r.ethnicity,
            likes: r.likes,
            liked_by: r.liked_by,
            created_at: r.created_at,
        }
    }
}

pub struct SqlxRecipeRepository {
    pub pool: PgPool,
}

impl SqlxRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxRecipeRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for SqlxRecipeRepository {
    #[instrument(skip(self, recipe), fields(recipe_id = %recipe.id))]
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "INSERT INTO recipes (id, title, images, ingredients, cook_time, ethnicity, likes, liked_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.images)
        .bind(Json(&recipe.ingredients))
        .bind(&recipe.cook_time)
        .bind(&recipe.ethnicity)
        .bind(recipe.likes)
        .bind(&recipe.liked_by)
        .bind(recipe.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DomainError::storage)?;

        debug!("recipe inserted");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, DomainError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::storage)?;
        Ok(row.map(Recipe::from))
    }

    #[instrument(skip(self))]
    async fn find_all(
        &self,
        page: PaginationRequest,
        ethnicity: Option<String>,
    ) -> Result<Vec<Recipe>, DomainError> {
        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes \
             WHERE ($1::text IS NULL OR ethnicity = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        ))
        .bind(ethnicity)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::storage)?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::storage)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(DomainError::storage)?;
        Ok(())
    }
}
