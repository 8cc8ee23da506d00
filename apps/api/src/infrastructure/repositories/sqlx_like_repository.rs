use super::{
    sqlx_recipe_repository::{RECIPE_COLUMNS, RecipeRow},
    sqlx_user_repository::{USER_COLUMNS, UserRow},
};
use crate::domain::{
    like::{
        repository::{LikeRepository, ReconcileReport},
        rules::{self, LikeAction},
    },
    recipe::entity::Recipe,
    shared::errors::DomainError,
    user::entity::User,
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Like bookkeeping over the `recipes` and `users` tables.
///
/// Rows are locked recipe first, then user(s), so concurrent toggles queue on
/// the recipe row instead of overwriting each other's counter.
pub struct SqlxLikeRepository {
    pub pool: PgPool,
}

impl SqlxLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxLikeRepository with connection pool");
        Self { pool }
    }

    async fn lock_recipe(
        tx: &mut Transaction<'_, Postgres>,
        recipe_id: Uuid,
    ) -> Result<Recipe, DomainError> {
        sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 FOR UPDATE"
        ))
        .bind(recipe_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(DomainError::storage)?
        .map(Recipe::from)
        .ok_or_else(|| DomainError::NotFound("Recipe not found".into()))
    }

    async fn save_recipe(
        tx: &mut Transaction<'_, Postgres>,
        recipe: &Recipe,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE recipes SET likes = $2, liked_by = $3 WHERE id = $1")
            .bind(recipe.id)
            .bind(recipe.likes)
            .bind(&recipe.liked_by)
            .execute(&mut **tx)
            .await
            .map_err(DomainError::storage)?;
        Ok(())
    }

    async fn save_user(tx: &mut Transaction<'_, Postgres>, user: &User) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET liked_recipes = $2 WHERE id = $1")
            .bind(user.id)
            .bind(&user.liked_recipes)
            .execute(&mut **tx)
            .await
            .map_err(DomainError::storage)?;
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for SqlxLikeRepository {
    #[instrument(skip(self))]
    async fn apply(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
        action: LikeAction,
    ) -> Result<i64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(DomainError::storage)?;

        let mut recipe = Self::lock_recipe(&mut tx, recipe_id).await?;
        let mut user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
        ))
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DomainError::storage)?
        .map(User::from)
        .ok_or_else(|| DomainError::NotFound("User not found".into()))?;

        // An error here drops `tx`, which rolls back and releases the locks.
        let likes = action.apply(&mut recipe, &mut user)?;

        Self::save_recipe(&mut tx, &recipe).await?;
        Self::save_user(&mut tx, &user).await?;
        tx.commit().await.map_err(DomainError::storage)?;

        debug!(likes, "like state committed");
        Ok(likes)
    }

    #[instrument(skip(self))]
    async fn reconcile(&self, recipe_id: Uuid) -> Result<ReconcileReport, DomainError> {
        let mut tx = self.pool.begin().await.map_err(DomainError::storage)?;

        let mut recipe = Self::lock_recipe(&mut tx, recipe_id).await?;
        let likes_before = rules::reconcile_counter(&mut recipe);

        // Users on either side of the relationship; anyone else is unaffected.
        let users = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE id = ANY($1) OR $2 = ANY(liked_recipes) \
             ORDER BY id FOR UPDATE"
        ))
        .bind(&recipe.liked_by)
        .bind(recipe_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(DomainError::storage)?;

        let mut users_repaired = 0;
        for row in users {
            let mut user = User::from(row);
            if rules::reconcile_user(recipe.id, &recipe.liked_by, &mut user) {
                Self::save_user(&mut tx, &user).await?;
                users_repaired += 1;
            }
        }

        Self::save_recipe(&mut tx, &recipe).await?;
        tx.commit().await.map_err(DomainError::storage)?;

        info!(likes_before, likes = recipe.likes, users_repaired, "recipe reconciled");
        Ok(ReconcileReport {
            likes_before,
            likes: recipe.likes,
            users_repaired,
        })
    }
}
