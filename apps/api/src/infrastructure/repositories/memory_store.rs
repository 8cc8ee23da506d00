use crate::domain::{
    like::{
        repository::{LikeRepository, ReconcileReport},
        rules::{self, LikeAction},
    },
    recipe::{entity::Recipe, repository::RecipeRepository},
    shared::{errors::DomainError, pagination::PaginationRequest},
    user::{entity::User, repository::UserRepository},
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Default)]
struct Documents {
    recipes: HashMap<Uuid, Recipe>,
    users: HashMap<Uuid, User>,
}

/// Process-local document store implementing every repository trait.
///
/// Both collections sit behind one lock, so a like mutation observes and
/// writes the recipe and the user as a single step. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    docs: Arc<RwLock<Documents>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a user document as-is. Lets tests plant drifted state.
    pub async fn put_user(&self, user: User) {
        self.docs.write().await.users.insert(user.id, user);
    }

    /// Overwrites a recipe document as-is. Lets tests plant drifted state.
    pub async fn put_recipe(&self, recipe: Recipe) {
        self.docs.write().await.recipes.insert(recipe.id, recipe);
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn create(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        let mut docs = self.docs.write().await;
        if docs.recipes.contains_key(&recipe.id) {
            return Err(DomainError::AlreadyExists("Recipe id already used".into()));
        }
        docs.recipes.insert(recipe.id, recipe.clone());
        Ok(recipe.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, DomainError> {
        Ok(self.docs.read().await.recipes.get(&id).cloned())
    }

    async fn find_all(
        &self,
        page: PaginationRequest,
        ethnicity: Option<String>,
    ) -> Result<Vec<Recipe>, DomainError> {
        let docs = self.docs.read().await;
        let mut recipes: Vec<&Recipe> = docs
            .recipes
            .values()
            .filter(|r| match &ethnicity {
                Some(wanted) => r.ethnicity.as_deref() == Some(wanted.as_str()),
                None => true,
            })
            .collect();
        recipes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(recipes
            .into_iter()
            .skip(usize::try_from(page.offset).unwrap_or(0))
            .take(usize::try_from(page.limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.docs.read().await.recipes.len() as i64)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut docs = self.docs.write().await;
        if docs.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::AlreadyExists("Email already registered".into()));
        }
        docs.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.docs.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .docs
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    #[instrument(skip(self))]
    async fn apply(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
        action: LikeAction,
    ) -> Result<i64, DomainError> {
        let mut docs = self.docs.write().await;
        let mut recipe = docs
            .recipes
            .get(&recipe_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound("Recipe not found".into()))?;
        let mut user = docs
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound("User not found".into()))?;

        let likes = action.apply(&mut recipe, &mut user)?;

        docs.recipes.insert(recipe.id, recipe);
        docs.users.insert(user.id, user);
        debug!(likes, "like state stored");
        Ok(likes)
    }

    #[instrument(skip(self))]
    async fn reconcile(&self, recipe_id: Uuid) -> Result<ReconcileReport, DomainError> {
        let mut docs = self.docs.write().await;
        let mut recipe = docs
            .recipes
            .get(&recipe_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound("Recipe not found".into()))?;
        let likes_before = rules::reconcile_counter(&mut recipe);

        let mut users_repaired = 0;
        for user in docs.users.values_mut() {
            if rules::reconcile_user(recipe.id, &recipe.liked_by, user) {
                users_repaired += 1;
            }
        }

        let likes = recipe.likes;
        docs.recipes.insert(recipe.id, recipe);
        Ok(ReconcileReport {
            likes_before,
            likes,
            users_repaired,
        })
    }
}
