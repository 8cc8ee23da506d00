use super::entity::Recipe;
use crate::domain::shared::{errors::DomainError, pagination::PaginationRequest};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, DomainError>;
    /// Newest first, optionally restricted to one ethnicity label.
    async fn find_all(
        &self,
        page: PaginationRequest,
        ethnicity: Option<String>,
    ) -> Result<Vec<Recipe>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    /// Cheap round trip used by the health check.
    async fn ping(&self) -> Result<(), DomainError>;
}
