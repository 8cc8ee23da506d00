use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A shared dish: what it is, how it looks, and who liked it.
///
/// # Invariants
/// - `likes` is never negative.
/// - `liked_by` holds each user id at most once.
/// - Under correct operation `likes == liked_by.len()`; see
///   [`crate::domain::like::rules::reconcile_counter`] for repairing drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    /// Public image paths in upload order.
    pub images: Vec<String>,
    pub ingredients: Ingredients,
    pub cook_time: Option<String>,
    /// Cuisine or category label, e.g. "Italian".
    pub ethnicity: Option<String>,
    pub likes: i64,
    pub liked_by: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(draft: NewRecipe) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: draft.title,
            images: draft.images,
            ingredients: draft.ingredients,
            cook_time: draft.cook_time,
            ethnicity: draft.ethnicity,
            likes: 0,
            liked_by: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by.contains(&user_id)
    }
}

/// Ingredients are either a free-text blurb or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Ingredients {
    List(Vec<String>),
    Text(String),
}

impl Default for Ingredients {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Ingredients {
    /// Interprets raw form values: one value holding a JSON array becomes a
    /// list, several values become a list, a single plain value stays text.
    pub fn from_form_values(values: Vec<String>) -> Self {
        let mut values: Vec<String> = values
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();

        match values.len() {
            0 => Self::default(),
            1 => {
                let single = values.remove(0);
                match serde_json::from_str::<Vec<String>>(&single) {
                    Ok(list) => Self::List(list),
                    Err(_) => Self::Text(single),
                }
            }
            _ => Self::List(values),
        }
    }
}

/// Fields supplied by the uploader; everything else is assigned on creation.
#[derive(Debug, Clone, Default)]
pub struct NewRecipe {
    pub title: String,
    pub images: Vec<String>,
    pub ingredients: Ingredients,
    pub cook_time: Option<String>,
    pub ethnicity: Option<String>,
}
