//! Ingredient endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use kucharka_common::api::types::{IngredientCreateDtoIn, IngredientList};
use kucharka_common::Ingredient;

use super::ApiError;
use crate::AppState;

/// GET /ingredient/list
pub async fn list_ingredients(State(state): State<AppState>) -> Result<Json<IngredientList>, ApiError> {
    let item_list = state.ingredients.list_ingredients().await?;
    Ok(Json(IngredientList { item_list }))
}

/// POST /ingredient/create
pub async fn create_ingredient(
    State(state): State<AppState>,
    dto_in: Result<Json<IngredientCreateDtoIn>, JsonRejection>,
) -> Result<Json<Ingredient>, ApiError> {
    let Json(dto_in) = dto_in?;
    let ingredient = state
        .ingredients
        .create_ingredient(&dto_in.user_id, &dto_in.name)
        .await?;
    Ok(Json(ingredient))
}
