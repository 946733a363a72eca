//! Per-call generation types.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, GenerationError};

/// Whether the reply may contain emojis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiPolicy {
    Allow,
    Forbid,
}

impl From<bool> for EmojiPolicy {
    fn from(enable: bool) -> Self {
        if enable { Self::Allow } else { Self::Forbid }
    }
}

/// Validated input for one generation, built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The text being replied to. Never blank.
    pub source_text: String,
    /// Personal tone instruction, if one was resolved.
    pub resolved_style: Option<String>,
    /// Words to exclude, in the order given.
    pub banned_words: Vec<String>,
    pub emoji_policy: EmojiPolicy,
}

/// Outcome of a generation cycle, held only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    Success { text: String },
    Failure { error_kind: ErrorKind, message: String },
}

impl GenerationResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(error_kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            error_kind,
            message: message.into(),
        }
    }

    /// Failure carrying the error's kind and its user-facing message.
    pub fn from_error(error: &GenerationError) -> Self {
        Self::failure(error.kind(), error.user_message())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure { .. } => None,
        }
    }
}

impl From<Result<String, GenerationError>> for GenerationResult {
    fn from(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(text) => Self::success(text),
            Err(e) => Self::from_error(&e),
        }
    }
}
