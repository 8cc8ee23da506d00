pub mod repository;
pub mod rules;
