use log::{debug, error, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::SpoonacularConfig;
use crate::error::PantryError;
use crate::extractor::IngredientList;

/// How many recipes to ask for
pub const RESULT_COUNT: u32 = 3;
/// Ranking mode 1: maximize used ingredients (2 would minimize missing ones)
pub const RANKING_MAXIMIZE_USED: u32 = 1;
/// Leave pantry staples out of the missing-ingredient accounting
pub const IGNORE_PANTRY: bool = true;

/// The recipe search response, kept exactly as the service returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeResult(Value);

impl RecipeResult {
    /// Wrap a response body. `findByIngredients` always answers with an array.
    pub fn from_value(value: Value) -> Result<Self, PantryError> {
        if value.is_array() {
            Ok(RecipeResult(value))
        } else {
            Err(PantryError::RecipeSearchError(format!(
                "expected a JSON array of recipes, got: {}",
                value
            )))
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.as_array().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typed view of the recipes. Entries that don't fit [`RecipeMatch`] are skipped.
    pub fn recipes(&self) -> Vec<RecipeMatch> {
        self.0
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn titles(&self) -> Vec<String> {
        self.recipes().into_iter().map(|r| r.title).collect()
    }

    /// Pretty-printed JSON for embedding in a prompt.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

/// One entry of a `findByIngredients` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeMatch {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    pub used_ingredients: Vec<RecipeIngredient>,
    pub missed_ingredients: Vec<RecipeIngredient>,
    pub unused_ingredients: Vec<RecipeIngredient>,
    pub likes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecipeIngredient {
    pub id: u64,
    pub name: String,
    pub original: String,
    pub amount: f64,
    pub unit: String,
}

/// Client for the Spoonacular `findByIngredients` endpoint
pub struct RecipeFinder {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RecipeFinder {
    pub fn new(
        api_key: impl Into<String>,
        config: &SpoonacularConfig,
        timeout: Duration,
    ) -> Result<Self, PantryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(RecipeFinder {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search for recipes, reporting any failure as "no result".
    ///
    /// The triggering error is logged; there is no retry and no partial result.
    pub async fn find(&self, ingredients: &IngredientList) -> Option<RecipeResult> {
        match self.try_find(ingredients).await {
            Ok(result) => Some(result),
            Err(e) => {
                error!("Error fetching recipes: {}", e);
                None
            }
        }
    }

    /// Search for recipes, surfacing the failure cause.
    pub async fn try_find(&self, ingredients: &IngredientList) -> Result<RecipeResult, PantryError> {
        let url = format!("{}/recipes/findByIngredients", self.base_url);
        let params = [
            ("ingredients", ingredients.as_str().to_string()),
            ("number", RESULT_COUNT.to_string()),
            ("ranking", RANKING_MAXIMIZE_USED.to_string()),
            ("ignorePantry", IGNORE_PANTRY.to_string()),
            ("apiKey", self.api_key.clone()),
        ];

        // Drop the URL from transport errors so the key never reaches the logs
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| PantryError::HttpError(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PantryError::RecipeSearchError(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PantryError::HttpError(e.without_url()))?;
        debug!("Spoonacular response: {}", body);

        let result = RecipeResult::from_value(body)?;
        info!(
            "Recipe search returned {} recipes: {:?}",
            result.len(),
            result.titles()
        );
        Ok(result)
    }
}
