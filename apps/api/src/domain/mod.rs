pub mod like;
pub mod recipe;
pub mod shared;
pub mod user;
