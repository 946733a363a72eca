//! Validated edits to the stored settings.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use warmer_protocols::{
    Credential, GenerationError, Preferences, SettingKey, SettingsPatch, SettingsStore,
    ToneMethod, ValidationError,
};

/// Which onboarding steps are complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetupStatus {
    pub has_credential: bool,
    pub has_tone: bool,
}

impl SetupStatus {
    pub fn is_ready(&self) -> bool {
        self.has_credential && self.has_tone
    }

    /// The next thing the user has to do, if anything.
    pub fn next_step(&self) -> Option<&'static str> {
        if !self.has_credential {
            Some("Add your API key with `warmer key set <KEY>`")
        } else if !self.has_tone {
            Some("Describe your tone with `warmer settings set --style <TEXT>` or upload samples with `warmer analyze <FILES>`")
        } else {
            None
        }
    }
}

/// Front door for every settings change.
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Current preferences, or the defaults when none are stored.
    pub async fn preferences(&self) -> Result<Preferences, GenerationError> {
        let snapshot = self.store.get(&[SettingKey::Settings]).await?;
        Ok(snapshot.preferences_or_default())
    }

    pub async fn save_credential(&self, key: &str) -> Result<(), GenerationError> {
        let credential = Credential::new(key);
        if credential.is_blank() {
            return Err(ValidationError::MissingCredential.into());
        }
        self.store
            .set(SettingsPatch::new().with_credential(credential))
            .await?;
        info!("Saved API key");
        Ok(())
    }

    /// Store the preferences as one unit after checking the tone is usable.
    pub async fn save_preferences(&self, preferences: Preferences) -> Result<(), GenerationError> {
        if !preferences.has_tone() {
            return Err(ValidationError::MissingTone.into());
        }
        self.store
            .set(SettingsPatch::new().with_preferences(preferences))
            .await?;
        info!("Saved preferences");
        Ok(())
    }

    /// Switch the tone method and keep everything else.
    pub async fn set_tone_method(&self, method: ToneMethod) -> Result<Preferences, GenerationError> {
        let mut preferences = self.preferences().await?;
        preferences.tone_method = method;
        self.store
            .set(SettingsPatch::new().with_preferences(preferences.clone()))
            .await?;
        Ok(preferences)
    }

    /// Drop a sample from the analysis. Removing the last one clears the
    /// analysis.
    pub async fn remove_source_file(&self, name: &str) -> Result<Preferences, GenerationError> {
        let mut preferences = self.preferences().await?;
        let Some(analysis) = preferences.style_analysis.as_mut() else {
            return Ok(preferences);
        };

        analysis.source_files.retain(|f| f != name);
        if analysis.source_files.is_empty() {
            preferences.style_analysis = None;
        }

        self.store
            .set(SettingsPatch::new().with_preferences(preferences.clone()))
            .await?;
        Ok(preferences)
    }

    /// Remove the credential and the preferences.
    pub async fn reset(&self) -> Result<(), GenerationError> {
        self.store.remove(&SettingKey::ALL).await?;
        info!("Settings reset");
        Ok(())
    }

    pub async fn status(&self) -> Result<SetupStatus, GenerationError> {
        let snapshot = self.store.get(&SettingKey::ALL).await?;
        Ok(SetupStatus {
            has_credential: snapshot.credential.is_some(),
            has_tone: snapshot
                .preferences
                .as_ref()
                .is_some_and(Preferences::has_tone),
        })
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
