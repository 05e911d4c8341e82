use log::info;
use std::fmt;

use crate::error::PantryError;
use crate::providers::{build_extraction_prompt, LlmProvider};

/// A comma-separated ingredient list as returned by the model.
///
/// Downstream stages consume the string as-is; [`IngredientList::items`] is
/// only a convenience view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientList(String);

impl IngredientList {
    pub fn new(list: impl Into<String>) -> Self {
        IngredientList(list.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual ingredient names, split on commas and newlines.
    pub fn items(&self) -> Vec<&str> {
        self.0
            .split([',', '\n'])
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }
}

impl fmt::Display for IngredientList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ask the model to pull the ingredients out of arbitrary user text.
pub async fn extract_ingredients(
    provider: &dyn LlmProvider,
    text: &str,
) -> Result<IngredientList, PantryError> {
    let prompt = build_extraction_prompt(text);
    let response = provider
        .generate(&prompt)
        .await
        .map_err(|e| PantryError::ExtractionError(e.to_string()))?;
    info!("Raw extraction response: {:?}", response);

    let cleaned = clean_model_output(&response);
    if cleaned.is_empty() {
        return Err(PantryError::ExtractionError(
            "the model returned no ingredients".to_string(),
        ));
    }

    let ingredients = IngredientList::new(cleaned);
    info!(
        "Extracted {} ingredients using {}",
        ingredients.items().len(),
        provider.provider_name()
    );
    Ok(ingredients)
}

/// Trim the response and peel off one layer of code fence or wrapping quotes.
///
/// Quotes are only peeled when they wrap the whole reply, so a list of
/// individually quoted names is left for the caller as-is.
fn clean_model_output(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(inner) = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    {
        // Drop an optional language tag on the opening fence line
        text = match inner.split_once('\n') {
            Some((tag, body)) if !tag.contains(',') => body,
            _ => inner,
        }
        .trim();
    }

    for quote in ['"', '\'', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            let inner = &text[1..text.len() - 1];
            if !inner.contains(quote) {
                text = inner.trim();
            }
            break;
        }
    }

    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CannedProvider;

    #[tokio::test]
    async fn test_extract_returns_trimmed_response() {
        let provider = CannedProvider::replying("  chicken breasts, onion, chopped tomatoes\n");
        let input =
            "I've got some chicken breasts, half an onion, and a can of chopped tomatoes";

        let ingredients = extract_ingredients(&provider, input).await.unwrap();
        assert_eq!(
            ingredients.as_str(),
            "chicken breasts, onion, chopped tomatoes"
        );

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(input));
    }

    #[tokio::test]
    async fn test_extract_failure_is_explicit() {
        let provider = CannedProvider::failing("quota exceeded");
        let err = extract_ingredients(&provider, "eggs").await.unwrap_err();
        match err {
            PantryError::ExtractionError(message) => assert!(message.contains("quota exceeded")),
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extract_blank_response_is_error() {
        let provider = CannedProvider::replying("   \n ");
        let result = extract_ingredients(&provider, "nothing useful").await;
        assert!(matches!(result, Err(PantryError::ExtractionError(_))));
    }

    #[test]
    fn test_clean_strips_quotes_and_fences() {
        assert_eq!(clean_model_output("\"eggs, spinach\""), "eggs, spinach");
        assert_eq!(clean_model_output("```\neggs, spinach\n```"), "eggs, spinach");
        assert_eq!(
            clean_model_output("```text\neggs, spinach\n```"),
            "eggs, spinach"
        );
        assert_eq!(clean_model_output("eggs, spinach"), "eggs, spinach");
        assert_eq!(clean_model_output("\""), "\"");
        assert_eq!(
            clean_model_output("\"eggs\", \"spinach\""),
            "\"eggs\", \"spinach\""
        );
        assert_eq!(clean_model_output("'feta', 'olives'"), "'feta', 'olives'");
    }

    #[tokio::test]
    async fn test_extract_keeps_individually_quoted_names_intact() {
        let provider = CannedProvider::replying("\"eggs\", \"spinach\"\n");
        let ingredients = extract_ingredients(&provider, "eggs and spinach")
            .await
            .unwrap();
        assert_eq!(ingredients.as_str(), "\"eggs\", \"spinach\"");
        assert_eq!(ingredients.items(), vec!["\"eggs\"", "\"spinach\""]);
    }

    #[test]
    fn test_items_view() {
        let list = IngredientList::new("eggs, spinach,\n feta ,");
        assert_eq!(list.items(), vec!["eggs", "spinach", "feta"]);
        assert_eq!(list.to_string(), "eggs, spinach,\n feta ,");
    }
}
