use super::rules::LikeAction;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReconcileReport {
    pub likes_before: i64,
    pub likes: i64,
    pub users_repaired: i64,
}

/// Mutates a recipe and a user as one unit.
///
/// Implementations must load both documents, run the rule for `action`, and
/// persist both or neither. Concurrent calls against the same recipe must not
/// lose updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn apply(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
        action: LikeAction,
    ) -> Result<i64, DomainError>;

    /// Treats `liked_by` as authoritative and repairs the counter and every
    /// affected user document.
    async fn reconcile(&self, recipe_id: Uuid) -> Result<ReconcileReport, DomainError>;
}
