//! Settings store protocol definitions.
//!
//! The store owns the credential and the preferences for the lifetime of
//! the install. Values are persisted as strings: the credential verbatim,
//! the preferences as one JSON object.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{Credential, Preferences};

/// Core trait for settings stores.
///
/// Last write wins per key. A single `set` is applied as one unit so a
/// concurrent `get` never observes half of it.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the store ID.
    fn id(&self) -> &str;

    /// Read the requested keys. Absent keys are `None` in the snapshot.
    async fn get(&self, keys: &[SettingKey]) -> Result<SettingsSnapshot, StoreError>;

    /// Write every key present in the patch.
    async fn set(&self, patch: SettingsPatch) -> Result<(), StoreError>;

    /// Delete the given keys.
    async fn remove(&self, keys: &[SettingKey]) -> Result<(), StoreError>;
}

/// Persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ApiKey,
    Settings,
}

impl SettingKey {
    pub const ALL: [SettingKey; 2] = [SettingKey::ApiKey, SettingKey::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey => "apiKey",
            Self::Settings => "settings",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "apiKey" => Some(Self::ApiKey),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

/// Partial view of the stored values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSnapshot {
    pub credential: Option<Credential>,
    pub preferences: Option<Preferences>,
}

impl SettingsSnapshot {
    /// Decode raw `(key, value)` rows. Unknown keys are ignored.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut snapshot = Self::default();
        for (key, value) in entries {
            match SettingKey::parse(key.as_ref()) {
                Some(SettingKey::ApiKey) => {
                    let credential = Credential::new(value.as_ref());
                    if !credential.is_blank() {
                        snapshot.credential = Some(credential);
                    }
                }
                Some(SettingKey::Settings) => {
                    let prefs = serde_json::from_str(value.as_ref()).map_err(|e| {
                        StoreError::Corrupt {
                            key: SettingKey::Settings.as_str().to_string(),
                            message: e.to_string(),
                        }
                    })?;
                    snapshot.preferences = Some(prefs);
                }
                None => {}
            }
        }
        Ok(snapshot)
    }

    /// Preferences, falling back to defaults when nothing is stored.
    pub fn preferences_or_default(&self) -> Preferences {
        self.preferences.clone().unwrap_or_default()
    }
}

/// Keys to write in one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub credential: Option<Credential>,
    pub preferences: Option<Preferences>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.credential.is_none() && self.preferences.is_none()
    }

    /// Encode the patch as raw `(key, value)` rows.
    pub fn into_entries(self) -> Result<Vec<(SettingKey, String)>, StoreError> {
        let mut entries = Vec::with_capacity(2);
        if let Some(credential) = self.credential {
            entries.push((SettingKey::ApiKey, credential.expose().to_string()));
        }
        if let Some(prefs) = self.preferences {
            let json = serde_json::to_string(&prefs).map_err(|e| StoreError::Corrupt {
                key: SettingKey::Settings.as_str().to_string(),
                message: e.to_string(),
            })?;
            entries.push((SettingKey::Settings, json));
        }
        Ok(entries)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
