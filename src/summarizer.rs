use log::{debug, info};
use std::fmt;

use crate::error::PantryError;
use crate::extractor::IngredientList;
use crate::providers::{build_summary_prompt, LlmProvider};
use crate::recipes::RecipeResult;

/// The friendly prose shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary(String);

impl Summary {
    pub fn new(text: impl Into<String>) -> Self {
        Summary(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Have the model present the recipes found for `ingredients`.
///
/// The recipe JSON goes into the prompt unchanged apart from pretty-printing.
pub async fn summarize_recipes(
    provider: &dyn LlmProvider,
    recipes: &RecipeResult,
    ingredients: &IngredientList,
) -> Result<Summary, PantryError> {
    let prompt = build_summary_prompt(ingredients.as_str(), &recipes.to_pretty_json());
    debug!("Summary prompt: {}", prompt);

    let response = provider
        .generate(&prompt)
        .await
        .map_err(|e| PantryError::SummarizationError(e.to_string()))?;

    let text = response.trim();
    if text.is_empty() {
        return Err(PantryError::SummarizationError(
            "the model returned an empty summary".to_string(),
        ));
    }

    info!("Summarized {} recipes", recipes.len());
    Ok(Summary::new(text))
}
