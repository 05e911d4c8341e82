use log::info;
use std::io::{self, BufRead, Write};

use crate::config::{AppConfig, Credentials};
use crate::error::PantryError;
use crate::extractor::{extract_ingredients, IngredientList};
use crate::providers::{GoogleProvider, LlmProvider, PROMPT_VERSION};
use crate::recipes::{RecipeFinder, RecipeResult};
use crate::summarizer::{summarize_recipes, Summary};

/// How a run ended when no stage failed hard
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Recipes were found and summarized
    Summary {
        ingredients: IngredientList,
        recipes: RecipeResult,
        summary: Summary,
    },
    /// The recipe search produced nothing usable; summarization was skipped
    NoRecipes { ingredients: IngredientList },
}

/// Width of the `=` rules framing a summary
pub const RULE_WIDTH: usize = 50;

/// Read one line of user text. Invalid UTF-8 is replaced rather than rejected
/// and the line ending is dropped.
pub fn read_user_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut raw = Vec::new();
    reader.read_until(b'\n', &mut raw)?;
    let line = String::from_utf8_lossy(&raw);
    Ok(line
        .trim_end_matches(|c: char| c == '\r' || c == '\n')
        .to_string())
}

/// Write the closing console message for a finished run.
pub fn render_outcome<W: Write>(
    result: &Result<Outcome, PantryError>,
    out: &mut W,
) -> io::Result<()> {
    match result {
        Ok(Outcome::Summary { summary, .. }) => {
            let rule = "=".repeat(RULE_WIDTH);
            writeln!(out, "\n{}", rule)?;
            writeln!(out, "{}", summary)?;
            writeln!(out, "{}", rule)
        }
        Ok(Outcome::NoRecipes { .. }) => writeln!(
            out,
            "\nSorry, I couldn't find any recipes. Please try again with different ingredients."
        ),
        Err(e) => {
            writeln!(
                out,
                "\nSorry, something went wrong while talking to the recipe assistant: {}",
                e
            )?;
            writeln!(
                out,
                "Please ensure your API keys are correct and you have network connectivity."
            )
        }
    }
}

/// The extract, search, summarize sequence with its two long-lived clients.
pub struct PantryChef {
    provider: Box<dyn LlmProvider>,
    finder: RecipeFinder,
}

impl PantryChef {
    pub fn new(provider: Box<dyn LlmProvider>, finder: RecipeFinder) -> Self {
        PantryChef { provider, finder }
    }

    /// Build the Gemini provider and recipe finder from validated credentials.
    pub fn from_config(credentials: &Credentials, config: &AppConfig) -> Result<Self, PantryError> {
        let provider = GoogleProvider::new(
            credentials.gemini_api_key.clone(),
            &config.gemini,
            config.timeout(),
        )?;
        info!(
            "Gemini API configured successfully (model '{}', prompt templates v{})",
            provider.model(),
            PROMPT_VERSION
        );

        let finder = RecipeFinder::new(
            credentials.spoonacular_api_key.clone(),
            &config.spoonacular,
            config.timeout(),
        )?;
        info!("Spoonacular API configured successfully");

        Ok(Self::new(Box::new(provider), finder))
    }

    /// Run all three stages once, writing progress lines to `out`.
    ///
    /// A failed recipe search ends the run with [`Outcome::NoRecipes`]; model
    /// failures end it with an error. Stages never run out of order.
    pub async fn run<W: Write>(&self, text: &str, out: &mut W) -> Result<Outcome, PantryError> {
        writeln!(out, "\nAnalyzing your ingredients...")?;
        let ingredients = extract_ingredients(self.provider.as_ref(), text).await?;
        writeln!(out, "Found ingredients: {}", ingredients)?;

        writeln!(out, "\nSearching for recipes...")?;
        let Some(recipes) = self.finder.find(&ingredients).await else {
            return Ok(Outcome::NoRecipes { ingredients });
        };

        writeln!(out, "\nCreating a delicious summary for you...")?;
        let summary = summarize_recipes(self.provider.as_ref(), &recipes, &ingredients).await?;

        Ok(Outcome::Summary {
            ingredients,
            recipes,
            summary,
        })
    }
}
