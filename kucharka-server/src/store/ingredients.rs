//! Ingredient store
//!
//! Same whole-file cycle as the recipe store, over `ingredients.json`.

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use kucharka_common::{Error, Ingredient, Result};

use super::JsonCollection;

#[derive(Clone)]
pub struct IngredientStore {
    collection: Arc<JsonCollection<Ingredient>>,
}

impl IngredientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            collection: Arc::new(JsonCollection::new(path)),
        }
    }

    pub fn path(&self) -> &Path {
        self.collection.path()
    }

    pub async fn ensure_initialized(&self) -> Result<()> {
        self.collection.ensure_initialized().await
    }

    pub async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.collection.load_all().await
    }

    /// Ids from `ids` that name no stored ingredient
    pub async fn unknown_ids<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Result<Vec<String>> {
        let known = self.collection.load_all().await?;
        Ok(ids
            .into_iter()
            .filter(|id| !known.iter().any(|i| i.id == *id))
            .map(str::to_string)
            .collect())
    }

    /// Add an ingredient; names are unique ignoring case
    pub async fn create_ingredient(&self, author_id: &str, name: &str) -> Result<Ingredient> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Ingredient name must not be empty".to_string(),
            ));
        }

        let mut ingredient = Ingredient::new(Uuid::new_v4().simple().to_string(), name);
        ingredient.author_id = (!author_id.is_empty()).then(|| author_id.to_string());
        ingredient.created_at = Some(Utc::now());

        let created = self
            .collection
            .update(move |ingredients| {
                let lowered = ingredient.name.to_lowercase();
                if ingredients.iter().any(|i| i.name.to_lowercase() == lowered) {
                    return Err(Error::Conflict(format!(
                        "Ingredient \"{}\" already exists",
                        ingredient.name
                    )));
                }
                ingredients.push(ingredient.clone());
                Ok(ingredient)
            })
            .await?;

        info!("Created ingredient {} ({})", created.id, created.name);
        Ok(created)
    }
}
