//! OpenAI-compatible completion client for Slightly Warmer.

mod api;
mod provider;

pub use provider::{OpenAIClient, DEFAULT_API_URL};
