use crate::domain::{
    recipe::{
        entity::{Ingredients, NewRecipe, Recipe},
        repository::RecipeRepository,
    },
    shared::errors::DomainError,
};
use tracing::info;

const SAMPLE_RECIPES: &[(&str, &[&str], &str, &str)] = &[
    (
        "Spaghetti Carbonara",
        &["Spaghetti", "Eggs", "Pancetta", "Parmesan Cheese", "Black Pepper"],
        "Italian",
        "30 min",
    ),
    (
        "Chicken Tikka Masala",
        &["Chicken", "Yogurt", "Tomato Sauce", "Garam Masala", "Garlic", "Ginger"],
        "Indian",
        "1 hr",
    ),
    (
        "Beef Tacos",
        &["Tortillas", "Ground Beef", "Cheddar Cheese", "Lettuce", "Tomato", "Sour Cream"],
        "Mexican",
        "25 min",
    ),
    (
        "Sushi Rolls",
        &["Sushi Rice", "Nori", "Salmon", "Avocado", "Cucumber"],
        "Japanese",
        "50 min",
    ),
    (
        "Pad Thai",
        &["Rice Noodles", "Shrimp", "Eggs", "Bean Sprouts", "Peanuts", "Tamarind Paste"],
        "Thai",
        "40 min",
    ),
    (
        "Greek Salad",
        &["Cucumber", "Tomato", "Feta Cheese", "Olives", "Red Onion", "Olive Oil"],
        "Greek",
        "15 min",
    ),
    (
        "Ratatouille",
        &["Eggplant", "Zucchini", "Bell Pepper", "Tomato", "Onion", "Garlic"],
        "French",
        "1 hr",
    ),
    (
        "Jollof Rice",
        &["Rice", "Tomato Paste", "Onion", "Bell Pepper", "Chicken", "Spices"],
        "West African",
        "1 hr",
    ),
    (
        "Falafel Wrap",
        &["Falafel", "Pita Bread", "Lettuce", "Tomato", "Tahini Sauce"],
        "Middle Eastern",
        "35 min",
    ),
    (
        "Pho",
        &["Rice Noodles", "Beef", "Broth", "Bean Sprouts", "Basil", "Lime"],
        "Vietnamese",
        "2 hr",
    ),
    (
        "Poutine",
        &["French Fries", "Cheese Curds", "Gravy"],
        "Canadian",
        "30 min",
    ),
    (
        "Paella",
        &["Rice", "Saffron", "Seafood", "Chicken", "Peas", "Bell Pepper"],
        "Spanish",
        "1 hr 15 min",
    ),
    (
        "Ceviche",
        &["Fish", "Lime Juice", "Onion", "Cilantro", "Chili Pepper"],
        "Peruvian",
        "20 min",
    ),
    (
        "Borscht",
        &["Beetroot", "Cabbage", "Potato", "Carrot", "Sour Cream"],
        "Ukrainian",
        "1 hr",
    ),
    (
        "Kimchi Stew",
        &["Kimchi", "Pork", "Tofu", "Scallions", "Gochugaru"],
        "Korean",
        "45 min",
    ),
    (
        "Baklava",
        &["Phyllo Dough", "Nuts", "Honey", "Butter", "Sugar"],
        "Turkish",
        "1 hr 30 min",
    ),
];

pub fn sample_recipes() -> Vec<NewRecipe> {
    SAMPLE_RECIPES
        .iter()
        .map(|(title, ingredients, ethnicity, cook_time)| NewRecipe {
            title: (*title).to_string(),
            images: Vec::new(),
            ingredients: Ingredients::List(ingredients.iter().map(|i| i.to_string()).collect()),
            cook_time: Some((*cook_time).to_string()),
            ethnicity: Some((*ethnicity).to_string()),
        })
        .collect()
}

/// Inserts the sample recipes when the store holds none; returns how many
/// were inserted.
pub async fn seed_sample_recipes(recipes: &dyn RecipeRepository) -> Result<usize, DomainError> {
    if recipes.count().await? > 0 {
        info!("recipe store not empty, skipping sample seed");
        return Ok(0);
    }

    let samples = sample_recipes();
    for draft in &samples {
        recipes.create(&Recipe::new(draft.clone())).await?;
    }
    info!(count = samples.len(), "sample recipes inserted");
    Ok(samples.len())
}
