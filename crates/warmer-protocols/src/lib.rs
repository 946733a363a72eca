//! # Warmer Protocols
//!
//! Shared definitions for the Slightly Warmer reply pipeline.
//! Contains only types and interfaces - no implementations.
//!
//! ## Core Traits
//!
//! - [`SettingsStore`] - Key-value persistence for the credential and preferences
//! - [`CompletionClient`] - Single-shot call to a text-generation service
//!
//! ## Core Types
//!
//! - [`Preferences`] - User style preferences
//! - [`Credential`] - Opaque API secret
//! - [`Message`] - Envelope payload exchanged between relay contexts

pub mod error;
pub mod message;
pub mod provider;
pub mod store;
pub mod types;

pub use error::{
    ErrorKind, GenerationError, ProviderError, RelayError, StoreError, ValidationError,
};
pub use message::{Action, ContextKind, Message, Severity};
pub use provider::{ChatMessage, ChatRequest, ChatRole, CompletionClient, ModelParams};
pub use store::{SettingKey, SettingsPatch, SettingsSnapshot, SettingsStore};
pub use types::*;
