//! The generation cycle.

use std::sync::Arc;

use tracing::{debug, info};

use warmer_protocols::{
    CompletionClient, GenerationError, ModelParams, SettingKey, SettingsSnapshot, SettingsStore,
    ValidationError,
};

use crate::prompt::PromptBuilder;

/// Runs one generation cycle: snapshot settings, build the prompt, call
/// the completion service once.
///
/// Immutable after construction and shared across overlapping triggers.
pub struct Generator {
    store: Arc<dyn SettingsStore>,
    client: Arc<dyn CompletionClient>,
    params: ModelParams,
}

impl Generator {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        client: Arc<dyn CompletionClient>,
        params: ModelParams,
    ) -> Self {
        Self {
            store,
            client,
            params,
        }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Read the credential and preferences in a single store call.
    pub async fn snapshot(&self) -> Result<SettingsSnapshot, GenerationError> {
        Ok(self.store.get(&SettingKey::ALL).await?)
    }

    /// Generate a reply to `source_text` from the current settings.
    pub async fn generate(&self, source_text: &str) -> Result<String, GenerationError> {
        let snapshot = self.snapshot().await?;
        self.generate_from(&snapshot, source_text).await
    }

    /// Generate a reply using an already taken snapshot.
    ///
    /// Input is validated in order: source text, tone, credential. Any
    /// validation failure returns before the client is called.
    pub async fn generate_from(
        &self,
        snapshot: &SettingsSnapshot,
        source_text: &str,
    ) -> Result<String, GenerationError> {
        let preferences = snapshot.preferences_or_default();
        let request = PromptBuilder::build(source_text, &preferences)?;
        let credential = snapshot
            .credential
            .as_ref()
            .ok_or(ValidationError::MissingCredential)?;

        debug!(
            provider = self.client.id(),
            tone_method = preferences.tone_method.as_str(),
            banned_words = request.banned_words.len(),
            "Requesting completion"
        );

        let chat = PromptBuilder::to_chat_request(&request);
        let text = self.client.complete(credential, chat, &self.params).await?;

        info!(chars = text.chars().count(), "Generated response");
        Ok(text)
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
