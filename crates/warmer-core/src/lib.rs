//! # Warmer Core
//!
//! The reply pipeline for Slightly Warmer.
//!
//! ## Components
//!
//! - [`PromptBuilder`] - Deterministic prompt construction from preferences
//! - [`Generator`] - One snapshot, one prompt, one completion call
//! - [`StyleAnalyzer`] - Derives a writing style from uploaded samples
//! - [`SettingsService`] - Validated edits to the stored settings
//! - [`MessageRelay`] - Routes messages between isolated contexts
//! - Context handlers for the background, content and popup contexts

pub mod analysis;
pub mod contexts;
pub mod generator;
pub mod prompt;
pub mod relay;
pub mod settings;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{StyleAnalyzer, WritingSample, MAX_SAMPLE_BYTES};
pub use contexts::{BackgroundService, ContentContext, PopupContext, Surface};
pub use generator::Generator;
pub use prompt::{parse_banned_words, PromptBuilder, SYSTEM_PROMPT};
pub use relay::{Endpoint, Envelope, MessageRelay, PendingReply, Responder};
pub use settings::{SettingsService, SetupStatus};
pub use store::MemorySettingsStore;
