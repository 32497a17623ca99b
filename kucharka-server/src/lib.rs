//! kucharka-server library - recipe storage behind an HTTP API

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use kucharka_common::config::DataFolderInitializer;

pub mod api;
pub mod pagination;
pub mod store;

use store::{IngredientStore, RecipeStore};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub recipes: RecipeStore,
    pub ingredients: IngredientStore,
}

impl AppState {
    pub fn new(recipes: RecipeStore, ingredients: IngredientStore) -> Self {
        Self {
            recipes,
            ingredients,
        }
    }

    /// Stores over the standard file names inside the data folder
    pub fn for_data_folder(initializer: &DataFolderInitializer) -> Self {
        Self::new(
            RecipeStore::new(initializer.recipes_path()),
            IngredientStore::new(initializer.ingredients_path()),
        )
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/recipe/list", get(api::list_recipes))
        .route("/recipe/create", post(api::create_recipe))
        .route("/recipe/delete", post(api::delete_recipe))
        .route("/recipe/:id", get(api::get_recipe))
        .route("/ingredient/list", get(api::list_ingredients))
        .route("/ingredient/create", post(api::create_ingredient))
        .route("/build_info", get(api::get_build_info));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
