//! Completion client trait definition.

use async_trait::async_trait;

use super::{ChatRequest, ModelParams};
use crate::error::ProviderError;
use crate::types::Credential;

/// Core trait for completion clients.
///
/// Implementations send exactly one request per call and never retry or
/// cache; identical inputs produce independent calls.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the client ID.
    fn id(&self) -> &str;

    /// Generate a completion and return the trimmed reply text.
    async fn complete(
        &self,
        credential: &Credential,
        request: ChatRequest,
        params: &ModelParams,
    ) -> Result<String, ProviderError>;
}
