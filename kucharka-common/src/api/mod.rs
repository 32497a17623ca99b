//! API request/response types shared by kucharka-server and kucharka-ui

pub mod types;

pub use types::{
    EmptyDtoOut, ErrorResponse, HealthResponse, IngredientCreateDtoIn, IngredientList, PageInfo,
    RecipeCreateDtoIn, RecipeDeleteDtoIn, RecipeListQuery, RecipePage,
};
