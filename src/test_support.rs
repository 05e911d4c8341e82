use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::PantryError;
use crate::providers::LlmProvider;

/// Provider that hands out scripted replies in order and records every prompt.
pub(crate) struct CannedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl CannedProvider {
    pub(crate) fn scripted(replies: Vec<Result<&str, &str>>) -> Self {
        CannedProvider {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(String::from).map_err(String::from))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(reply: &str) -> Self {
        Self::scripted(vec![Ok(reply)])
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(message)])
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for CannedProvider {
    fn provider_name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, prompt: &str) -> Result<String, PantryError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply left".to_string()))
            .map_err(PantryError::ProviderError)
    }
}
