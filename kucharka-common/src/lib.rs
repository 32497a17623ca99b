//! # Kuchařka Common Library
//!
//! Shared code for the Kuchařka server and front end:
//! - Recipe and ingredient data model
//! - API request/response types (dtoIn/dtoOut)
//! - Configuration loading and data folder resolution
//! - Error types

pub mod api;
pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{Ingredient, Recipe, RecipeDraft, RecipeIngredient};
