use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::IndexedRandom;

use crate::domain::ai::model::{AiError, InlineImage, NO_KEY_MESSAGE, OFFLINE_MESSAGE};

#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, AiError>;
}

/// Sends a prompt to the first model that answers, using one key drawn at
/// random from the pool for the whole request.
pub struct AiDispatcher {
    client: Arc<dyn GenerationClient>,
    keys: Vec<String>,
    models: Vec<String>,
}

impl AiDispatcher {
    pub fn new(client: Arc<dyn GenerationClient>, keys: Vec<String>, models: Vec<String>) -> Self {
        AiDispatcher { client, keys, models }
    }

    pub fn has_keys(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Never fails: errors collapse into the user-facing sentinel strings.
    pub async fn ask(&self, prompt: &str, image: Option<&InlineImage>) -> String {
        let api_key = match self.keys.choose(&mut rand::rng()) {
            Some(key) => key,
            None => {
                log::warn!("AI request rejected: no API key configured");
                return NO_KEY_MESSAGE.to_string();
            }
        };

        for model in &self.models {
            match self.client.generate(api_key, model, prompt, image).await {
                Ok(text) if !text.trim().is_empty() => {
                    log::info!("AI request served by {}", model);
                    return text;
                },
                Ok(_) => log::debug!("{} answered with empty text, trying next model", model),
                Err(e) => log::debug!("{} failed: {}, trying next model", model, e),
            }
        }

        log::warn!("AI request failed on all {} models", self.models.len());
        OFFLINE_MESSAGE.to_string()
    }
}
