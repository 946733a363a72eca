//! Validation errors raised before any network call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Source text is empty")]
    EmptySourceText,

    #[error("No personal tone configured")]
    MissingTone,

    #[error("No API key configured")]
    MissingCredential,

    #[error("No writing samples provided")]
    NoSamples,

    #[error("Invalid writing sample {name}: {reason}")]
    InvalidSample { name: String, reason: String },
}
