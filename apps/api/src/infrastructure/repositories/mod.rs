pub mod memory_store;
pub mod sqlx_like_repository;
pub mod sqlx_recipe_repository;
pub mod sqlx_user_repository;

use crate::{
    config::{Config, StoreBackend},
    domain::{
        like::repository::LikeRepository, recipe::repository::RecipeRepository,
        user::repository::UserRepository,
    },
    infrastructure::database::pool::{create_pool, run_migrations},
};
use memory_store::InMemoryStore;
use sqlx::PgPool;
use sqlx_like_repository::SqlxLikeRepository;
use sqlx_recipe_repository::SqlxRecipeRepository;
use sqlx_user_repository::SqlxUserRepository;
use std::sync::Arc;

/// The three repositories the application needs, backed by one store.
#[derive(Clone)]
pub struct Stores {
    pub recipes: Arc<dyn RecipeRepository>,
    pub users: Arc<dyn UserRepository>,
    pub likes: Arc<dyn LikeRepository>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            recipes: Arc::new(SqlxRecipeRepository::new(pool.clone())),
            users: Arc::new(SqlxUserRepository::new(pool.clone())),
            likes: Arc::new(SqlxLikeRepository::new(pool)),
        }
    }

    pub fn memory(store: InMemoryStore) -> Self {
        Self {
            recipes: Arc::new(store.clone()),
            users: Arc::new(store.clone()),
            likes: Arc::new(store),
        }
    }

    /// Builds the configured backend, running migrations for Postgres.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        match config.store_backend {
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; data is lost on restart");
                Ok(Self::memory(InMemoryStore::new()))
            }
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for postgres"))?;
                let pool = create_pool(url, config.database_max_connections).await?;
                run_migrations(&pool, config.ignore_missing_migrations).await?;
                Ok(Self::postgres(pool))
            }
        }
    }
}
