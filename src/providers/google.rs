use crate::config::GeminiConfig;
use crate::error::PantryError;
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider. The HTTP client is built once and
    /// reused for every call.
    pub fn new(
        api_key: impl Into<String>,
        config: &GeminiConfig,
        timeout: Duration,
    ) -> Result<Self, PantryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(GoogleProvider {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(&self, prompt: &str) -> Result<String, PantryError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        // Drop the URL from transport errors so the key never reaches the logs
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens
                }
            }))
            .send()
            .await
            .map_err(|e| PantryError::HttpError(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PantryError::HttpError(e.without_url()))?;
        debug!("Google Gemini response ({}): {}", status, body);

        let response_body: Value = serde_json::from_str(&body).map_err(|e| {
            PantryError::ProviderError(format!(
                "Unreadable Google Gemini response (HTTP {}): {}",
                status, e
            ))
        })?;

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_code = error["code"].as_i64().unwrap_or(status.as_u16() as i64);
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(PantryError::ProviderError(format!(
                "Google Gemini API error ({}): {}",
                error_code, error_message
            )));
        }

        if !status.is_success() {
            return Err(PantryError::ProviderError(format!(
                "Google Gemini returned HTTP {}",
                status
            )));
        }

        if let Some(reason) = response_body["promptFeedback"]["blockReason"].as_str() {
            return Err(PantryError::ProviderError(format!(
                "Google Gemini blocked the prompt: {}",
                reason
            )));
        }

        // A candidate may split its answer across several text parts
        let text: String = response_body["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(PantryError::ProviderError(
                "Failed to extract content from Google Gemini response".to_string(),
            ));
        }

        Ok(text)
    }
}
