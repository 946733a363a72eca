//! Generation-cycle errors and the user-facing taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ProviderError, RelayError, StoreError, ValidationError};

/// Coarse classification shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input or missing setup; no network call was made.
    Validation,
    /// The credential was rejected; the user should re-enter it.
    Auth,
    /// Any other service, network or storage failure.
    Service,
    /// The relay could not reach the target context.
    Delivery,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::Auth => "auth",
            Self::Service => "service",
            Self::Delivery => "delivery",
        };
        f.write_str(s)
    }
}

/// Any error terminating a generation attempt. Nothing is retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Completion failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Settings store failed: {0}")]
    Store(#[from] StoreError),

    #[error("Delivery failed: {0}")]
    Relay(#[from] RelayError),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Provider(e) if e.is_auth_error() => ErrorKind::Auth,
            Self::Provider(_) | Self::Store(_) => ErrorKind::Service,
            Self::Relay(_) => ErrorKind::Delivery,
        }
    }

    /// Human-readable summary safe to show in any context.
    ///
    /// Never includes the credential, the settings, or the raw service body.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::EmptySourceText) => {
                "Please enter some text to generate a response".to_string()
            }
            Self::Validation(ValidationError::MissingTone) => {
                "Please set up your personal tone in Settings first".to_string()
            }
            Self::Validation(ValidationError::MissingCredential) => {
                "API key not found. Please add your API key in settings".to_string()
            }
            Self::Validation(ValidationError::NoSamples) => {
                "Please upload a writing sample".to_string()
            }
            Self::Validation(ValidationError::InvalidSample { name, reason }) => {
                format!("{name}: {reason}")
            }
            Self::Provider(e) if e.is_auth_error() => {
                "Invalid API key. Please check your API key in settings".to_string()
            }
            Self::Provider(_) | Self::Store(_) => {
                "Failed to generate response. Please try again".to_string()
            }
            Self::Relay(_) => "Could not reach the generator. Please try again".to_string(),
        }
    }

    /// User-facing text for a failed writing-style analysis.
    pub fn analysis_message(&self) -> String {
        match self {
            Self::Provider(e) if !e.is_auth_error() => {
                "Failed to analyze writing style. Please try again".to_string()
            }
            Self::Store(_) | Self::Relay(_) => {
                "Failed to analyze writing style. Please try again".to_string()
            }
            _ => self.user_message(),
        }
    }

    /// Short title for a notification.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::MissingCredential) => "API Key Missing",
            Self::Provider(e) if e.is_auth_error() => "Invalid API Key",
            _ => "Error",
        }
    }
}
