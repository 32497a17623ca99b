//! [`BackendCalls`] over HTTP

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use kucharka_common::api::types::{
    EmptyDtoOut, ErrorResponse, IngredientCreateDtoIn, IngredientList, RecipeCreateDtoIn, RecipeDeleteDtoIn,
    RecipeListQuery, RecipePage,
};
use kucharka_common::{Ingredient, Recipe};

use crate::alerts::{Alert, AlertQueue};
use crate::calls::{BackendCallError, BackendCalls};

/// Default server address
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5780";

impl From<reqwest::Error> for BackendCallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendCallError::Decode(err.to_string())
        } else {
            BackendCallError::Transport(err.to_string())
        }
    }
}

/// Talks to kucharka-server and keeps alerts in an [`AlertQueue`]
#[derive(Debug, Clone)]
pub struct HttpCalls {
    client: reqwest::Client,
    base_url: String,
    alerts: AlertQueue,
}

impl HttpCalls {
    pub fn new(base_url: impl Into<String>, alerts: AlertQueue) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            alerts,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn alerts(&self) -> &AlertQueue {
        &self.alerts
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Recipe, BackendCallError> {
        let url = self.recipe_url(id)?;
        self.send(self.client.get(url)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/recipe/<id>` with the id percent-encoded as one path segment
    fn recipe_url(&self, id: &str) -> Result<reqwest::Url, BackendCallError> {
        let mut url = reqwest::Url::parse(&self.url("/recipe"))
            .map_err(|e| BackendCallError::Transport(format!("Invalid server URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| BackendCallError::Transport(format!("Invalid server URL {}", self.base_url)))?
            .push(id);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, BackendCallError> {
        let request = request.build()?;
        debug!("{} {}", request.method(), request.url());
        let response = self.client.execute(request).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendCallError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => (body.error, body.message),
        Err(_) => (String::new(), text),
    };
    warn!("Server returned {}: {}", status, message);
    Err(BackendCallError::Status {
        status: status.as_u16(),
        code,
        message,
    })
}

#[async_trait]
impl BackendCalls for HttpCalls {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, BackendCallError> {
        let list: IngredientList = self.send(self.client.get(self.url("/ingredient/list"))).await?;
        Ok(list.item_list)
    }

    async fn list_recipes(&self, query: &RecipeListQuery) -> Result<RecipePage, BackendCallError> {
        self.send(self.client.get(self.url("/recipe/list")).query(query)).await
    }

    async fn create_recipe(&self, dto_in: &RecipeCreateDtoIn) -> Result<Recipe, BackendCallError> {
        self.send(self.client.post(self.url("/recipe/create")).json(dto_in)).await
    }

    async fn delete_recipe(&self, dto_in: &RecipeDeleteDtoIn) -> Result<EmptyDtoOut, BackendCallError> {
        self.send(self.client.post(self.url("/recipe/delete")).json(dto_in)).await
    }

    async fn create_ingredient(&self, dto_in: &IngredientCreateDtoIn) -> Result<Ingredient, BackendCallError> {
        self.send(self.client.post(self.url("/ingredient/create")).json(dto_in)).await
    }

    fn add_alert(&self, alert: Alert) {
        self.alerts.push(alert);
    }
}
