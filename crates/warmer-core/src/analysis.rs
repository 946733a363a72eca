//! Writing-style analysis from uploaded samples.

use std::sync::Arc;

use tracing::{debug, info};

use warmer_protocols::{
    ChatRequest, CompletionClient, GenerationError, ModelParams, SettingKey, SettingsPatch,
    SettingsStore, StyleAnalysis, ToneMethod, ValidationError,
};

/// Largest accepted sample, in bytes.
pub const MAX_SAMPLE_BYTES: usize = 1024 * 1024;

const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert in analyzing writing styles. Analyze the provided text and describe the writing style in a way that can be used as instructions to replicate it. Focus on tone, formality, sentence structure, word choice, and any unique characteristics.";

const ANALYSIS_INSTRUCTION: &str = "Analyze the writing style in the following text and provide a concise summary that captures the key characteristics:";

/// A piece of the user's own writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritingSample {
    pub name: String,
    pub content: String,
}

impl WritingSample {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.content.len() > MAX_SAMPLE_BYTES {
            return Err(ValidationError::InvalidSample {
                name: self.name.clone(),
                reason: "File size must be less than 1MB".to_string(),
            });
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::InvalidSample {
                name: self.name.clone(),
                reason: "File is empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Derives a reusable style description from writing samples and stores
/// it as the active tone.
pub struct StyleAnalyzer {
    store: Arc<dyn SettingsStore>,
    client: Arc<dyn CompletionClient>,
    params: ModelParams,
}

impl StyleAnalyzer {
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

    /// Build the analysis request for the given samples.
    pub fn build_request(samples: &[WritingSample]) -> Result<ChatRequest, ValidationError> {
        if samples.is_empty() {
            return Err(ValidationError::NoSamples);
        }
        for sample in samples {
            sample.validate()?;
        }

        let combined = samples
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(ChatRequest::new(
            ANALYSIS_SYSTEM_PROMPT,
            format!("{ANALYSIS_INSTRUCTION}\n\n{combined}"),
        ))
    }

    /// Analyze the samples, then store the result and switch the tone
    /// method to upload in one write.
    pub async fn analyze(
        &self,
        samples: &[WritingSample],
    ) -> Result<StyleAnalysis, GenerationError> {
        let request = Self::build_request(samples)?;

        let snapshot = self.store.get(&SettingKey::ALL).await?;
        let credential = snapshot
            .credential
            .as_ref()
            .ok_or(ValidationError::MissingCredential)?;

        debug!(samples = samples.len(), "Requesting style analysis");
        let text = self.client.complete(credential, request, &self.params).await?;

        let analysis = StyleAnalysis::new(
            text.trim(),
            samples.iter().map(|s| s.name.clone()).collect(),
        );

        let mut preferences = snapshot.preferences_or_default();
        preferences.tone_method = ToneMethod::Upload;
        preferences.style_analysis = Some(analysis.clone());
        self.store
            .set(SettingsPatch::new().with_preferences(preferences))
            .await?;

        info!(
            source_files = analysis.source_files.len(),
            "Stored writing style analysis"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
