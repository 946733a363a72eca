//! SQLite settings store implementation.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;
use tracing::debug;

use warmer_protocols::{SettingKey, SettingsPatch, SettingsSnapshot, SettingsStore, StoreError};

use crate::schema::init_schema;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// SQLite-backed settings store.
///
/// Every `set` and `remove` runs in one transaction.
pub struct SqliteSettingsStore {
    conn: Connection,
}

impl SqliteSettingsStore {
    /// Create a new in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Self::init(conn).await
    }

    /// Open (or create) a file-backed database.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }

        debug!(path = %path.display(), "Opening settings database");
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.call(|conn| Ok(init_schema(conn)?))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    fn id(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, keys: &[SettingKey]) -> Result<SettingsSnapshot, StoreError> {
        let keys: Vec<&'static str> = keys.iter().map(SettingKey::as_str).collect();
        let rows = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
                let mut rows = Vec::with_capacity(keys.len());
                for key in keys {
                    let value: Option<String> =
                        stmt.query_row([key], |row| row.get(0)).optional()?;
                    if let Some(value) = value {
                        rows.push((key, value));
                    }
                }
                Ok(rows)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        SettingsSnapshot::from_entries(rows)
    }

    async fn set(&self, patch: SettingsPatch) -> Result<(), StoreError> {
        let entries = patch.into_entries()?;
        if entries.is_empty() {
            return Ok(());
        }

        let now = Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                for (key, value) in &entries {
                    tx.execute(
                        "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                        params![key.as_str(), value, now],
                    )?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn remove(&self, keys: &[SettingKey]) -> Result<(), StoreError> {
        let keys: Vec<&'static str> = keys.iter().map(SettingKey::as_str).collect();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                for key in keys {
                    tx.execute("DELETE FROM settings WHERE key = ?1", [key])?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }
}
