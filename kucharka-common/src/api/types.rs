//! Shared API request/response types
//!
//! Requests carry the caller's identity in `userId` next to the payload,
//! matching what the front end sends for every mutating call.

use serde::{Deserialize, Serialize};

use crate::models::{Ingredient, Recipe, RecipeDraft};

/// Default page size for recipe listings
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Largest page size the server accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

// ========================================
// Recipe listing
// ========================================

/// Query string of `GET /recipe/list`
///
/// # Examples
///
/// ```
/// // GET /recipe/list?text=soup&page-size=12&page-number=2
/// use kucharka_common::api::types::RecipeListQuery;
///
/// let query = RecipeListQuery::new("soup", 12, 2);
/// assert_eq!(query.page_number(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecipeListQuery {
    /// Free-text filter on name and description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "page-size", default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// 1-based page number
    #[serde(rename = "page-number", default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl RecipeListQuery {
    pub fn new(text: impl Into<String>, page_size: u32, page_number: u32) -> Self {
        let text = text.into();
        Self {
            text: (!text.is_empty()).then_some(text),
            page_size: Some(page_size),
            page_number: Some(page_number),
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn page_number(&self) -> u32 {
        self.page_number.unwrap_or(1)
    }
}

/// Pagination metadata of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Page actually returned (1-based, clamped into range)
    pub page_number: u32,
    pub page_size: u32,
    /// Number of recipes matching the filter
    pub total: u32,
    pub total_pages: u32,
}

/// One page of recipes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePage {
    pub item_list: Vec<Recipe>,
    pub page_info: PageInfo,
}

// ========================================
// Mutations
// ========================================

/// Body of `POST /recipe/create`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreateDtoIn {
    #[serde(default)]
    pub user_id: String,
    pub data: RecipeDraft,
}

/// Body of `POST /recipe/delete`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDeleteDtoIn {
    #[serde(default)]
    pub user_id: String,
    pub id: String,
}

/// Body of `POST /ingredient/create`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCreateDtoIn {
    #[serde(default)]
    pub user_id: String,
    pub name: String,
}

/// Response of `GET /ingredient/list`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientList {
    pub item_list: Vec<Ingredient>,
}

/// Empty result object, serialized as `{}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmptyDtoOut {}

// ========================================
// Service responses
// ========================================

/// Error body returned with every non-2xx status
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}
