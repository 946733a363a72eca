//! Durable SQLite settings store for Slightly Warmer.

mod schema;
mod store;

pub use store::SqliteSettingsStore;
