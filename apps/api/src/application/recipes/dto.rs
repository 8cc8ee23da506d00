use bytes::Bytes;
use serde::Deserialize;
use validator::Validate;

/// One image part of a recipe upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Raw `ingredients` form values, see `Ingredients::from_form_values`.
    pub ingredients: Vec<String>,
    pub cook_time: Option<String>,
    pub ethnicity: Option<String>,
    pub images: Vec<ImageUpload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub ethnicity: Option<String>,
}

/// Trims a free-text field, mapping blank input to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
