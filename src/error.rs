use thiserror::Error;

/// Errors that can occur while turning pantry text into recipe suggestions
#[derive(Error, Debug)]
pub enum PantryError {
    /// A required credential is absent or blank
    #[error("{0} must be set in the environment or a .env file")]
    MissingCredential(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The language model service rejected the request or returned nothing usable
    #[error("Language model error: {0}")]
    ProviderError(String),

    /// No ingredient list could be obtained from the user's text
    #[error("Ingredient extraction failed: {0}")]
    ExtractionError(String),

    /// The recipe search service failed
    #[error("Recipe search failed: {0}")]
    RecipeSearchError(String),

    /// No summary could be produced for the recipes found
    #[error("Summarization failed: {0}")]
    SummarizationError(String),

    /// Console I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
