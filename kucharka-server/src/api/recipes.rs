//! Recipe endpoints
//!
//! Thin wrappers over [`RecipeStore`](crate::store::RecipeStore): every call
//! goes straight to storage, nothing is cached between requests.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::debug;

use kucharka_common::api::types::{EmptyDtoOut, RecipeCreateDtoIn, RecipeDeleteDtoIn, RecipeListQuery, RecipePage};
use kucharka_common::{Error, Recipe};

use super::ApiError;
use crate::AppState;

/// GET /recipe/list?text=&page-size=&page-number=
///
/// One page of recipes whose name or description contains `text`.
pub async fn list_recipes(
    State(state): State<AppState>,
    query: Result<Query<RecipeListQuery>, QueryRejection>,
) -> Result<Json<RecipePage>, ApiError> {
    let Query(query) = query?;
    debug!(?query, "Listing recipes");
    let page = state.recipes.search(&query).await?;
    Ok(Json(page))
}

/// GET /recipe/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.recipes.get_recipe(&id).await?))
}

/// POST /recipe/create
///
/// Every ingredient the draft refers to must already exist.
pub async fn create_recipe(
    State(state): State<AppState>,
    dto_in: Result<Json<RecipeCreateDtoIn>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Json(dto_in) = dto_in?;
    let unknown = state
        .ingredients
        .unknown_ids(dto_in.data.ingredients.iter().map(|i| i.id.as_str()))
        .await?;
    if !unknown.is_empty() {
        return Err(Error::InvalidInput(format!("Unknown ingredients: {}", unknown.join(", "))).into());
    }

    let recipe = state
        .recipes
        .create_recipe(&dto_in.user_id, dto_in.data)
        .await?;
    Ok(Json(recipe))
}

/// POST /recipe/delete
///
/// Returns `{}` whether or not the id existed.
pub async fn delete_recipe(
    State(state): State<AppState>,
    dto_in: Result<Json<RecipeDeleteDtoIn>, JsonRejection>,
) -> Result<Json<EmptyDtoOut>, ApiError> {
    let Json(dto_in) = dto_in?;
    debug!(user_id = %dto_in.user_id, id = %dto_in.id, "Deleting recipe");
    Ok(Json(state.recipes.delete_recipe(&dto_in.id).await?))
}
