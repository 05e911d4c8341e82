mod google;
mod prompt;

pub use google::GoogleProvider;
pub use prompt::{
    build_extraction_prompt, build_summary_prompt, INGREDIENT_EXTRACTION_PROMPT, PROMPT_VERSION,
    RECIPE_SUMMARY_PROMPT,
};

use crate::error::PantryError;
use async_trait::async_trait;

/// Unified trait for generative text services
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Submit a prompt and return the text of the first candidate response
    async fn generate(&self, prompt: &str) -> Result<String, PantryError>;
}
