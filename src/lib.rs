//! Pantry Chef: describe what's in your kitchen, get recipe ideas back.
//!
//! A run is three calls in a fixed order: the language model extracts an
//! ingredient list from free text, Spoonacular searches recipes for it, and the
//! language model turns the results into a friendly summary.

pub mod config;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod providers;
pub mod recipes;
pub mod summarizer;

#[cfg(test)]
mod test_support;

pub use config::{AppConfig, Credentials};
pub use error::PantryError;
pub use extractor::{extract_ingredients, IngredientList};
pub use pipeline::{read_user_line, render_outcome, Outcome, PantryChef};
pub use providers::{GoogleProvider, LlmProvider};
pub use recipes::{RecipeFinder, RecipeMatch, RecipeResult};
pub use summarizer::{summarize_recipes, Summary};
