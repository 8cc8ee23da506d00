//! Consistency rules for the like relationship.
//!
//! A like is recorded on both documents: the recipe's `liked_by` set and
//! counter, and the user's `liked_recipes` set. These functions only mutate
//! in-memory documents; stores are responsible for loading both documents
//! and persisting them in one atomic write.

use crate::domain::{recipe::entity::Recipe, shared::errors::DomainError, user::entity::User};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    /// Applies the action to both documents and returns the new counter.
    pub fn apply(self, recipe: &mut Recipe, user: &mut User) -> Result<i64, DomainError> {
        match self {
            Self::Like => like(recipe, user),
            Self::Unlike => Ok(unlike(recipe, user)),
        }
    }
}

/// Strict: a second like from the same user is rejected and nothing changes.
pub fn like(recipe: &mut Recipe, user: &mut User) -> Result<i64, DomainError> {
    if recipe.is_liked_by(user.id) {
        return Err(DomainError::AlreadyLiked);
    }

    recipe.liked_by.push(user.id);
    if !user.has_liked(recipe.id) {
        user.liked_recipes.push(recipe.id);
    }
    recipe.likes += 1;
    Ok(recipe.likes)
}

/// Tolerant: clears whichever side still references the other and only
/// decrements when either side showed a like. Never fails.
pub fn unlike(recipe: &mut Recipe, user: &mut User) -> i64 {
    let was_liked = recipe.is_liked_by(user.id) || user.has_liked(recipe.id);
    if was_liked && recipe.likes > 0 {
        recipe.likes -= 1;
    }

    recipe.liked_by.retain(|id| *id != user.id);
    user.liked_recipes.retain(|id| *id != recipe.id);
    recipe.likes
}

/// Rebuilds the recipe side from `liked_by`, dropping duplicate ids.
/// Returns the counter value before the repair.
pub fn reconcile_counter(recipe: &mut Recipe) -> i64 {
    let before = recipe.likes;
    let mut seen = Vec::with_capacity(recipe.liked_by.len());
    recipe.liked_by.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(*id);
            true
        }
    });
    recipe.likes = recipe.liked_by.len() as i64;
    before
}

/// Aligns one user's liked set with the recipe's `liked_by`.
/// Returns `true` when the user document changed.
pub fn reconcile_user(recipe_id: Uuid, liked_by: &[Uuid], user: &mut User) -> bool {
    let should_have = liked_by.contains(&user.id);
    match (should_have, user.has_liked(recipe_id)) {
        (true, false) => {
            user.liked_recipes.push(recipe_id);
            true
        }
        (false, true) => {
            user.liked_recipes.retain(|id| *id != recipe_id);
            true
        }
        _ => false,
    }
}
