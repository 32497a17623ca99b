//! Recipe list controller
//!
//! Holds the filter values and which modal is open, forwards user actions to
//! [`BackendCalls`] and keeps the last page the server returned. Every
//! successful mutation is followed by a re-fetch of the current page instead
//! of patching the cached page locally.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use kucharka_common::api::types::{IngredientCreateDtoIn, RecipeCreateDtoIn, RecipeDeleteDtoIn, RecipeListQuery, RecipePage};
use kucharka_common::{Ingredient, Recipe, RecipeDraft};

use crate::alerts::Alert;
use crate::calls::{BackendCallError, BackendCalls};
use crate::identity::Identity;

/// Recipes per page
pub const PAGE_SIZE: u32 = 12;

/// Filter field holding the free-text search
pub const TEXT_FILTER: &str = "text";

/// Filter fields the list query carries
pub const FILTER_FIELDS: &[&str] = &[TEXT_FILTER];

/// Which dialog is presented, and for which recipe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub detail: Option<Recipe>,
    pub create: bool,
    pub delete: Option<Recipe>,
}

pub struct RecipeController<C> {
    calls: C,
    identity: Identity,
    filter: BTreeMap<String, String>,
    modals: ModalState,
    recipe_page: Option<RecipePage>,
    ingredients: Vec<Ingredient>,
}

impl<C: BackendCalls> RecipeController<C> {
    pub fn new(calls: C, identity: Identity) -> Self {
        let mut filter = BTreeMap::new();
        filter.insert(TEXT_FILTER.to_string(), String::new());

        Self {
            calls,
            identity,
            filter,
            modals: ModalState::default(),
            recipe_page: None,
            ingredients: Vec::new(),
        }
    }

    pub fn calls(&self) -> &C {
        &self.calls
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn filter(&self) -> &BTreeMap<String, String> {
        &self.filter
    }

    pub fn modals(&self) -> &ModalState {
        &self.modals
    }

    /// Last page returned by the server, if any fetch succeeded
    pub fn recipe_page(&self) -> Option<&RecipePage> {
        self.recipe_page.as_ref()
    }

    pub fn recipes(&self) -> &[Recipe] {
        self.recipe_page
            .as_ref()
            .map(|page| page.item_list.as_slice())
            .unwrap_or(&[])
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn ingredient_name(&self, id: &str) -> Option<&str> {
        self.ingredients
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.name.as_str())
    }

    /// Page number of the cached page, 1 before the first fetch
    pub fn current_page(&self) -> u32 {
        self.recipe_page
            .as_ref()
            .map(|page| page.page_info.page_number)
            .unwrap_or(1)
    }

    pub fn rights_summary(&self) -> String {
        self.identity.rights_summary()
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Initial load: ingredient list and the first recipe page, concurrently
    pub async fn mount(&mut self) {
        let query = self.list_query(1);
        let (ingredients, page) = tokio::join!(
            self.calls.list_ingredients(),
            self.calls.list_recipes(&query)
        );
        self.apply_ingredients(ingredients);
        self.apply_page(page);
    }

    /// Query the server with the current filter values for `page`
    pub async fn search(&mut self, page: u32) {
        let query = self.list_query(page);
        debug!(?query, "Searching recipes");
        let result = self.calls.list_recipes(&query).await;
        self.apply_page(result);
    }

    pub async fn on_page_change(&mut self, page: u32) {
        self.search(page).await;
    }

    /// Re-fetch the page currently shown
    pub async fn on_refresh(&mut self) {
        self.search(self.current_page()).await;
    }

    pub async fn reload_ingredients(&mut self) {
        let result = self.calls.list_ingredients().await;
        self.apply_ingredients(result);
    }

    /// Update one filter field; does not query the server.
    ///
    /// Returns `false` and leaves the filter untouched for a field the list
    /// query has no parameter for.
    pub fn handle_change(&mut self, field: &str, value: impl Into<String>) -> bool {
        if !FILTER_FIELDS.contains(&field) {
            warn!("Ignoring unknown filter field {:?}", field);
            return false;
        }
        self.filter.insert(field.to_string(), value.into());
        true
    }

    fn list_query(&self, page: u32) -> RecipeListQuery {
        let text = self.filter.get(TEXT_FILTER).map(String::as_str).unwrap_or("");
        RecipeListQuery::new(text, PAGE_SIZE, page)
    }

    fn apply_page(&mut self, result: Result<RecipePage, BackendCallError>) {
        match result {
            Ok(page) => self.recipe_page = Some(page),
            Err(e) => {
                warn!("Listing recipes failed: {}", e);
                self.calls.add_alert(Alert::error("Načtení receptů selhalo."));
            }
        }
    }

    fn apply_ingredients(&mut self, result: Result<Vec<Ingredient>, BackendCallError>) {
        match result {
            Ok(ingredients) => self.ingredients = ingredients,
            Err(e) => {
                warn!("Listing ingredients failed: {}", e);
                self.calls.add_alert(Alert::error("Načtení ingrediencí selhalo."));
            }
        }
    }

    // ---------------------------------------------------------------------
    // Detail
    // ---------------------------------------------------------------------

    pub fn show_detail(&mut self, recipe: Recipe) {
        self.modals.detail = Some(recipe);
    }

    pub fn close_detail(&mut self) {
        self.modals.detail = None;
    }

    // ---------------------------------------------------------------------
    // Create
    // ---------------------------------------------------------------------

    pub fn show_create(&mut self) {
        self.modals.create = true;
    }

    pub fn close_create(&mut self) {
        self.modals.create = false;
    }

    /// Submit the create form.
    ///
    /// On success the modal closes, a success alert is queued and the current
    /// page is fetched again. On failure only an error alert is queued.
    pub async fn submit_create(&mut self, draft: RecipeDraft) -> Result<Recipe, BackendCallError> {
        let dto_in = RecipeCreateDtoIn {
            user_id: self.identity.uu_identity.clone(),
            data: draft,
        };

        match self.calls.create_recipe(&dto_in).await {
            Ok(recipe) => {
                self.modals.create = false;
                self.calls
                    .add_alert(Alert::success(format!("Recept \"{}\" byl vytvořen.", recipe.name)));
                self.on_refresh().await;
                Ok(recipe)
            }
            Err(e) => {
                warn!("Creating recipe failed: {}", e);
                self.calls.add_alert(Alert::error("Vytvoření receptu selhalo."));
                Err(e)
            }
        }
    }

    /// Create an ingredient from inside the create form.
    ///
    /// The new ingredient is handed back to the form; the cached ingredient
    /// list is fetched again.
    pub async fn create_ingredient(&mut self, name: &str) -> Result<Ingredient, BackendCallError> {
        let dto_in = IngredientCreateDtoIn {
            user_id: self.identity.uu_identity.clone(),
            name: name.to_string(),
        };

        match self.calls.create_ingredient(&dto_in).await {
            Ok(ingredient) => {
                self.calls.add_alert(Alert::success(format!(
                    "Ingredience \"{}\" byla vytvořena.",
                    ingredient.name
                )));
                self.reload_ingredients().await;
                Ok(ingredient)
            }
            Err(e) => {
                warn!("Creating ingredient failed: {}", e);
                self.calls.add_alert(Alert::error("Vytvoření ingredience selhalo."));
                Err(e)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Delete
    // ---------------------------------------------------------------------

    /// Open the delete confirmation; the detail dialog closes
    pub fn show_delete(&mut self, recipe: Recipe) {
        self.modals.delete = Some(recipe);
        self.modals.detail = None;
    }

    pub fn close_delete(&mut self) {
        self.modals.delete = None;
    }

    /// Confirm deletion of `recipe`.
    ///
    /// A failed delete leaves the confirmation dialog open.
    pub async fn submit_delete(&mut self, recipe: &Recipe) -> Result<(), BackendCallError> {
        let dto_in = RecipeDeleteDtoIn {
            user_id: self.identity.uu_identity.clone(),
            id: recipe.id.clone(),
        };

        match self.calls.delete_recipe(&dto_in).await {
            Ok(_) => {
                self.modals.delete = None;
                self.calls
                    .add_alert(Alert::success(format!("Recept \"{}\" byl smazán.", recipe.name)));
                self.on_refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!("Deleting recipe {} failed: {}", recipe.id, e);
                self.calls.add_alert(Alert::error("Smazání receptu selhalo."));
                Err(e)
            }
        }
    }
}
