use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Stored user document. Never serialized to clients directly; see
/// [`UserProfile`] for the public shape.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    /// Lowercased, unique across users.
    pub email: String,
    /// Bcrypt hash; `None` for accounts created through a social provider.
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub apple_id: Option<String>,
    pub liked_recipes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn with_password(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            email,
            password_hash: Some(password_hash),
            google_id: None,
            apple_id: None,
            liked_recipes: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_liked(&self, recipe_id: Uuid) -> bool {
        self.liked_recipes.contains(&recipe_id)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            liked_recipes: self.liked_recipes.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub liked_recipes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}
