use super::dto::LikeCountResponse;
use crate::domain::{
    like::{
        repository::{LikeRepository, ReconcileReport},
        rules::LikeAction,
    },
    shared::errors::DomainError,
    user::entity::User,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Like, unlike, and repair for a recipe on behalf of a resolved user.
pub struct LikeRecipeUseCase {
    likes: Arc<dyn LikeRepository>,
}

impl LikeRecipeUseCase {
    pub fn new(likes: Arc<dyn LikeRepository>) -> Self {
        Self { likes }
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn like(&self, recipe_id: Uuid, user: &User) -> Result<LikeCountResponse, DomainError> {
        self.toggle(recipe_id, user, LikeAction::Like).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn unlike(
        &self,
        recipe_id: Uuid,
        user: &User,
    ) -> Result<LikeCountResponse, DomainError> {
        self.toggle(recipe_id, user, LikeAction::Unlike).await
    }

    #[instrument(skip(self))]
    pub async fn reconcile(&self, recipe_id: Uuid) -> Result<ReconcileReport, DomainError> {
        self.likes.reconcile(recipe_id).await
    }

    async fn toggle(
        &self,
        recipe_id: Uuid,
        user: &User,
        action: LikeAction,
    ) -> Result<LikeCountResponse, DomainError> {
        let likes = self.likes.apply(recipe_id, user.id, action).await?;
        info!(?action, likes, "like toggled");
        Ok(LikeCountResponse { likes })
    }
}
