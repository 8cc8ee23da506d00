pub mod auth;
pub mod like_recipe;
pub mod recipes;
