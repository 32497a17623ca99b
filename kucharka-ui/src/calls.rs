//! Backend collaborator used by the controller
//!
//! Each mutating call returns a `Result` instead of taking a success and an
//! error callback.

use async_trait::async_trait;
use thiserror::Error;

use kucharka_common::api::types::{
    EmptyDtoOut, IngredientCreateDtoIn, RecipeCreateDtoIn, RecipeDeleteDtoIn, RecipeListQuery, RecipePage,
};
use kucharka_common::{Ingredient, Recipe};

use crate::alerts::Alert;

/// Failure of a backend call
#[derive(Error, Debug)]
pub enum BackendCallError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait BackendCalls: Send + Sync {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, BackendCallError>;

    async fn list_recipes(&self, query: &RecipeListQuery) -> Result<RecipePage, BackendCallError>;

    async fn create_recipe(&self, dto_in: &RecipeCreateDtoIn) -> Result<Recipe, BackendCallError>;

    async fn delete_recipe(&self, dto_in: &RecipeDeleteDtoIn) -> Result<EmptyDtoOut, BackendCallError>;

    async fn create_ingredient(&self, dto_in: &IngredientCreateDtoIn) -> Result<Ingredient, BackendCallError>;

    /// Queue a notification for display
    fn add_alert(&self, alert: Alert);
}
