//! Recipe and ingredient data model
//!
//! Field names follow the camelCase JSON used by the storage files and the API.
//! Only `id` and `name` are required. Every other known member is read
//! leniently: a value of an unexpected shape, or an explicit `null`, is not an
//! error but is kept verbatim in `extra` and written back as it was found.
//! Members this model does not know about are carried through `extra` too.

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Members of one stored JSON object, taken out key by key
struct Members(Map<String, Value>);

impl Members {
    fn from_deserializer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Members)
    }

    fn required<T: DeserializeOwned, E: de::Error>(&mut self, key: &'static str) -> Result<T, E> {
        let value = self.0.remove(key).ok_or_else(|| E::missing_field(key))?;
        serde_json::from_value(value).map_err(|e| E::custom(format!("invalid `{}`: {}", key, e)))
    }

    /// The member as `T`, or `None` leaving the raw value in place
    fn lenient<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let parsed = match self.0.get(key) {
            None | Some(Value::Null) => return None,
            Some(value) => T::deserialize(value).ok()?,
        };
        self.0.remove(key);
        Some(parsed)
    }

    /// Like [`lenient`](Self::lenient) for lists; an empty list stays raw so
    /// it is written back even though empty lists are otherwise omitted
    fn lenient_list<T: DeserializeOwned>(&mut self, key: &str) -> Vec<T> {
        if matches!(self.0.get(key), Some(Value::Array(items)) if items.is_empty()) {
            return Vec::new();
        }
        self.lenient(key).unwrap_or_default()
    }

    fn into_extra(self) -> Map<String, Value> {
        self.0
    }
}

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Server-assigned identifier, unique within the collection
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    /// Identity that created the recipe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    /// Minimal recipe with only id and name set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
            author_id: None,
            created_at: None,
            extra: Map::new(),
        }
    }

    /// Case-insensitive substring match on name and description.
    ///
    /// An empty (or whitespace-only) needle matches every recipe.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}

impl<'de> Deserialize<'de> for Recipe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::from_deserializer(deserializer)?;
        Ok(Self {
            id: members.required("id")?,
            name: members.required("name")?,
            description: members.lenient("description"),
            ingredients: members.lenient_list("ingredients"),
            steps: members.lenient_list("steps"),
            author_id: members.lenient("authorId"),
            created_at: members.lenient("createdAt"),
            extra: members.into_extra(),
        })
    }
}

/// Reference from a recipe to an ingredient, with an optional quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    /// Ingredient id
    pub id: String,
    /// Kept as the stored number so integers stay integers on rewrite
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecipeIngredient {
    /// A non-finite amount is dropped
    pub fn new(id: impl Into<String>, amount: Option<f64>, unit: Option<String>) -> Self {
        Self {
            id: id.into(),
            amount: amount.and_then(Number::from_f64),
            unit,
            extra: Map::new(),
        }
    }

    pub fn amount_value(&self) -> Option<f64> {
        self.amount.as_ref().and_then(Number::as_f64)
    }

    /// Amount stored in a form other than a JSON number, e.g. `"200"`
    pub fn raw_amount(&self) -> Option<&Value> {
        self.extra.get("amount").filter(|v| !v.is_null())
    }
}

impl<'de> Deserialize<'de> for RecipeIngredient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::from_deserializer(deserializer)?;
        Ok(Self {
            id: members.required("id")?,
            amount: members.lenient("amount"),
            unit: members.lenient("unit"),
            extra: members.into_extra(),
        })
    }
}

/// User-supplied recipe content, before the server assigns an id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
}

/// A stored ingredient
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author_id: None,
            created_at: None,
            extra: Map::new(),
        }
    }
}

impl<'de> Deserialize<'de> for Ingredient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::from_deserializer(deserializer)?;
        Ok(Self {
            id: members.required("id")?,
            name: members.required("name")?,
            author_id: members.lenient("authorId"),
            created_at: members.lenient("createdAt"),
            extra: members.into_extra(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_recipe_serializes_without_empty_members() {
        let recipe = Recipe::new("2", "Salad");
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value, json!({"id": "2", "name": "Salad"}));
    }

    #[test]
    fn test_unknown_members_survive_rewrite() {
        let stored = json!({
            "id": "7",
            "name": "Guláš",
            "portions": 4,
            "tags": ["hlavní jídlo"]
        });
        let recipe: Recipe = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(recipe.extra.get("portions"), Some(&json!(4)));
        assert_eq!(serde_json::to_value(&recipe).unwrap(), stored);
    }

    #[test]
    fn test_camel_case_members() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": "1",
            "name": "Soup",
            "authorId": "user-1",
            "ingredients": [{"id": "i1", "amount": 2.5, "unit": "l"}]
        }))
        .unwrap();
        assert_eq!(recipe.author_id.as_deref(), Some("user-1"));
        assert_eq!(recipe.ingredients[0].unit.as_deref(), Some("l"));
        assert!(recipe.extra.is_empty());
    }

    #[test]
    fn test_unexpected_member_shapes_are_kept_verbatim() {
        let stored = json!({
            "id": "1",
            "name": "Soup",
            "createdAt": "2023-05-01",
            "steps": "Vař dokud není hotovo",
            "ingredients": [{"id": "x", "amount": "200", "unit": "g"}]
        });
        let recipe: Recipe = serde_json::from_value(stored.clone()).unwrap();

        assert!(recipe.created_at.is_none());
        assert!(recipe.steps.is_empty());
        assert_eq!(recipe.ingredients[0].amount, None);
        assert_eq!(recipe.ingredients[0].raw_amount(), Some(&json!("200")));
        assert_eq!(recipe.ingredients[0].unit.as_deref(), Some("g"));
        assert_eq!(serde_json::to_value(&recipe).unwrap(), stored);
    }

    #[test]
    fn test_explicit_nulls_and_empty_lists_survive_rewrite() {
        let stored = json!({
            "id": "1",
            "name": "Soup",
            "description": null,
            "authorId": null,
            "steps": []
        });
        let recipe: Recipe = serde_json::from_value(stored.clone()).unwrap();

        assert!(recipe.description.is_none());
        assert!(recipe.author_id.is_none());
        assert_eq!(serde_json::to_value(&recipe).unwrap(), stored);
    }

    #[test]
    fn test_integer_amount_stays_integer() {
        let stored = json!({"id": "x", "amount": 3});
        let item: RecipeIngredient = serde_json::from_value(stored.clone()).unwrap();

        assert_eq!(item.amount_value(), Some(3.0));
        assert_eq!(serde_json::to_value(&item).unwrap(), stored);
    }

    #[test]
    fn test_id_and_name_are_required() {
        assert!(serde_json::from_value::<Recipe>(json!({"name": "Soup"})).is_err());
        assert!(serde_json::from_value::<Recipe>(json!({"id": 1, "name": "Soup"})).is_err());
        assert!(serde_json::from_value::<Ingredient>(json!({"id": "s"})).is_err());
    }

    #[test]
    fn test_ingredient_date_only_created_at_is_kept() {
        let stored = json!({"id": "s", "name": "Sůl", "createdAt": "2023-05-01"});
        let ingredient: Ingredient = serde_json::from_value(stored.clone()).unwrap();

        assert!(ingredient.created_at.is_none());
        assert_eq!(serde_json::to_value(&ingredient).unwrap(), stored);
    }

    #[test]
    fn test_matches_text() {
        let mut recipe = Recipe::new("1", "Houbová polévka");
        recipe.description = Some("Podzimní klasika".to_string());

        assert!(recipe.matches_text(""));
        assert!(recipe.matches_text("   "));
        assert!(recipe.matches_text("POLÉVKA"));
        assert!(recipe.matches_text("klasika"));
        assert!(!recipe.matches_text("salát"));
    }
}
