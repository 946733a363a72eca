//! Completion service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

impl ProviderError {
    /// Classify a non-success HTTP response.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 => Self::AuthenticationFailed(message),
            _ => Self::ApiError { status, message },
        }
    }

    /// Whether the remote service rejected the credential.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
