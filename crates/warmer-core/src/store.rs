//! In-process settings store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use warmer_protocols::{SettingKey, SettingsPatch, SettingsSnapshot, SettingsStore, StoreError};

/// Settings store kept in memory. Nothing survives the process.
///
/// Holds the same string encoding as the durable store, so a corrupt or
/// unexpected value behaves identically in tests.
#[derive(Default)]
pub struct MemorySettingsStore {
    entries: RwLock<HashMap<SettingKey, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing patch encoding.
    pub fn with_raw(self, key: SettingKey, value: impl Into<String>) -> Self {
        self.entries.write().insert(key, value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    fn id(&self) -> &str {
        "memory"
    }

    async fn get(&self, keys: &[SettingKey]) -> Result<SettingsSnapshot, StoreError> {
        let entries = self.entries.read();
        let found: Vec<(&'static str, String)> = keys
            .iter()
            .filter_map(|k| entries.get(k).map(|v| (k.as_str(), v.clone())))
            .collect();
        drop(entries);
        SettingsSnapshot::from_entries(found)
    }

    async fn set(&self, patch: SettingsPatch) -> Result<(), StoreError> {
        let encoded = patch.into_entries()?;
        let mut entries = self.entries.write();
        for (key, value) in encoded {
            entries.insert(key, value);
        }
        Ok(())
    }

    async fn remove(&self, keys: &[SettingKey]) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}
