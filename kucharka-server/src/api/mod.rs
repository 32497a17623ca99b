//! HTTP API handlers for kucharka-server

pub mod buildinfo;
pub mod error;
pub mod health;
pub mod ingredients;
pub mod recipes;

pub use buildinfo::get_build_info;
pub use error::ApiError;
pub use health::health_routes;
pub use ingredients::{create_ingredient, list_ingredients};
pub use recipes::{create_recipe, delete_recipe, get_recipe, list_recipes};
