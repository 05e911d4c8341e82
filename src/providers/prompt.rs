/// Prompt asking the model to pull a comma-separated ingredient list out of free text.
///
/// The prompt is loaded from `extract_prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax. Contains a `{{TEXT}}` placeholder.
pub const INGREDIENT_EXTRACTION_PROMPT: &str = include_str!("extract_prompt.txt");

/// Prompt asking the model to present recipe search results to the user.
///
/// Contains `{{INGREDIENTS}}` and `{{RECIPES}}` placeholders.
pub const RECIPE_SUMMARY_PROMPT: &str = include_str!("summary_prompt.txt");

/// Bumped whenever either template changes the output shape it asks for.
pub const PROMPT_VERSION: u32 = 1;

/// Embed the user's text verbatim into the extraction prompt.
pub fn build_extraction_prompt(text: &str) -> String {
    INGREDIENT_EXTRACTION_PROMPT.replace("{{TEXT}}", text)
}

/// Embed the ingredient list and the serialized recipe JSON into the summary prompt.
pub fn build_summary_prompt(ingredients: &str, recipes_json: &str) -> String {
    RECIPE_SUMMARY_PROMPT
        .replace("{{INGREDIENTS}}", ingredients)
        .replace("{{RECIPES}}", recipes_json)
}
