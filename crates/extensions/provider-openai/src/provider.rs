//! OpenAI completion client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use warmer_protocols::{ChatRequest, CompletionClient, Credential, ModelParams, ProviderError};

use crate::api::{error_message, ApiRequest, ApiResponse};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for OpenAI-compatible chat completion endpoints.
///
/// Sends exactly one request per call. No retries.
pub struct OpenAIClient {
    api_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_API_URL)
    }

    /// Create a client for a custom endpoint (OpenAI-compatible APIs).
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout.as_secs())
        } else {
            ProviderError::Network(e.to_string())
        }
    }

    async fn send_request(
        &self,
        credential: &Credential,
        api_request: &ApiRequest,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(credential.expose())
            .timeout(self.timeout)
            .json(api_request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            // The body may echo part of the key.
            return Err(ProviderError::AuthenticationFailed(
                "API key rejected".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(ProviderError::from_api_response(
                status.as_u16(),
                error_message(&body),
            ));
        }

        Ok(body)
    }
}

impl Default for OpenAIClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    fn id(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        credential: &Credential,
        request: ChatRequest,
        params: &ModelParams,
    ) -> Result<String, ProviderError> {
        let api_request = ApiRequest::new(request, params);
        debug!(
            model = %api_request.model,
            max_tokens = api_request.max_tokens,
            "Sending chat completion"
        );

        let body = self.send_request(credential, &api_request).await?;
        let response: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(model) = &response.model {
            debug!(%model, "Chat completion received");
        }

        response
            .into_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ProviderError::InvalidResponse("no message content".to_string()))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
