use crate::{
    application::auth::{gate::AuthGate, token::TokenService},
    config::Config,
    domain::{
        like::repository::LikeRepository, recipe::repository::RecipeRepository,
        user::repository::UserRepository,
    },
    infrastructure::{repositories::Stores, storage::traits::StorageService},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recipe_repo: Arc<dyn RecipeRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub like_repo: Arc<dyn LikeRepository>,
    pub storage: Arc<dyn StorageService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(config: Config, stores: Stores, storage: Arc<dyn StorageService>) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt_secret, config.jwt_ttl_hours));
        Self {
            config,
            recipe_repo: stores.recipes,
            user_repo: stores.users,
            like_repo: stores.likes,
            storage,
            tokens,
        }
    }

    pub fn auth_gate(&self) -> AuthGate {
        AuthGate::new(self.tokens.clone(), self.user_repo.clone())
    }
}
