//! Recipe store (DAO)
//!
//! Sole owner of the recipe collection file. All reads and writes of
//! `recipes.json` go through here.

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use kucharka_common::api::types::{EmptyDtoOut, PageInfo, RecipeListQuery, RecipePage, MAX_PAGE_SIZE};
use kucharka_common::{Error, Recipe, RecipeDraft, Result};

use super::JsonCollection;
use crate::pagination::calculate_pagination;

/// Longest accepted recipe name, in characters
pub const MAX_NAME_LEN: usize = 255;

#[derive(Clone)]
pub struct RecipeStore {
    collection: Arc<JsonCollection<Recipe>>,
}

impl RecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            collection: Arc::new(JsonCollection::new(path)),
        }
    }

    pub fn path(&self) -> &Path {
        self.collection.path()
    }

    /// Create the storage file with an empty array if it is missing
    pub async fn ensure_initialized(&self) -> Result<()> {
        self.collection.ensure_initialized().await
    }

    /// The full recipe sequence in storage order
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.collection.load_all().await
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Recipe> {
        self.collection
            .load_all()
            .await?
            .into_iter()
            .find(|recipe| recipe.id == id)
            .ok_or_else(|| Error::NotFound(format!("Recipe {}", id)))
    }

    /// Filter by text and cut out one page, keeping storage order
    pub async fn search(&self, query: &RecipeListQuery) -> Result<RecipePage> {
        let page_size = query.page_size();
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidInput(format!(
                "page-size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let matching: Vec<Recipe> = self
            .collection
            .load_all()
            .await?
            .into_iter()
            .filter(|recipe| recipe.matches_text(query.text()))
            .collect();

        let total = u32::try_from(matching.len()).unwrap_or(u32::MAX);
        let p = calculate_pagination(total, page_size, query.page_number());
        let item_list = matching
            .into_iter()
            .skip(p.offset)
            .take(page_size as usize)
            .collect();

        Ok(RecipePage {
            item_list,
            page_info: PageInfo {
                page_number: p.page,
                page_size,
                total,
                total_pages: p.total_pages,
            },
        })
    }

    /// Validate the draft, assign a fresh id and append it
    pub async fn create_recipe(&self, author_id: &str, draft: RecipeDraft) -> Result<Recipe> {
        let mut recipe = validate_draft(draft)?;
        recipe.author_id = (!author_id.is_empty()).then(|| author_id.to_string());
        recipe.created_at = Some(Utc::now());

        let created = self
            .collection
            .update(move |recipes| {
                while recipes.iter().any(|r| r.id == recipe.id) {
                    recipe.id = new_id();
                }
                recipes.push(recipe.clone());
                Ok(recipe)
            })
            .await?;

        info!("Created recipe {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Remove the first recipe with `id`.
    ///
    /// An unknown id is not an error: the collection is written back unchanged.
    pub async fn delete_recipe(&self, id: &str) -> Result<EmptyDtoOut> {
        let id = id.to_string();
        let removed = self
            .collection
            .update(move |recipes| {
                Ok(recipes
                    .iter()
                    .position(|r| r.id == id)
                    .map(|index| recipes.remove(index)))
            })
            .await?;

        match removed {
            Some(recipe) => info!("Deleted recipe {} ({})", recipe.id, recipe.name),
            None => debug!("Delete of unknown recipe ignored"),
        }
        Ok(EmptyDtoOut {})
    }

    /// Overwrite the collection with `recipes`
    pub async fn replace_all(&self, recipes: Vec<Recipe>) -> Result<()> {
        self.collection.replace_all(recipes).await
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn validate_draft(draft: RecipeDraft) -> Result<Recipe> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("Recipe name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::InvalidInput(format!(
            "Recipe name is longer than {} characters",
            MAX_NAME_LEN
        )));
    }
    if let Some(bad) = draft
        .ingredients
        .iter()
        .find(|i| i.raw_amount().is_some() || i.amount_value().is_some_and(|a| a < 0.0))
    {
        return Err(Error::InvalidInput(format!(
            "Invalid amount for ingredient {}",
            bad.id
        )));
    }

    let mut recipe = Recipe::new(new_id(), name);
    recipe.description = draft
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    recipe.ingredients = draft.ingredients;
    recipe.steps = draft
        .steps
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(recipe)
}
