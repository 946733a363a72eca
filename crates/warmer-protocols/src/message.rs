//! Cross-context message protocol.
//!
//! ## Core Concepts
//!
//! - **ContextKind**: one of the isolated execution environments (privileged
//!   background, per-page content, transient popup)
//! - **Message**: the tagged payload carried between contexts; created at
//!   dispatch, consumed exactly once, never persisted

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, GenerationError, RelayError};
use crate::types::GenerationResult;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Relay context identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    /// Holds network privileges and the settings store.
    Background,
    /// Injected into the page the user selected text on.
    Content,
    /// Short-lived manual-entry surface.
    Popup,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Popup => "popup",
        };
        f.write_str(s)
    }
}

/// Request actions understood by the background context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Generate,
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Loading,
    Success,
    Error,
}

/// Message exchanged between contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    /// Ask the receiving context to perform an action.
    Request { action: Action, payload: String },

    /// Status update for a toast/notification affordance. Never replied to.
    Notification {
        severity: Severity,
        title: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error_kind: Option<ErrorKind>,
    },

    /// A generated reply ready for display.
    ResponseReady { text: String },
}

impl Message {
    /// Create a generation request for the given source text.
    pub fn generate(source_text: impl Into<String>) -> Self {
        Self::Request {
            action: Action::Generate,
            payload: source_text.into(),
        }
    }

    /// Create a notification.
    pub fn notification(
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Notification {
            severity,
            title: title.into(),
            message: message.into(),
            error_kind: None,
        }
    }

    /// Create an error notification describing a failed generation.
    pub fn failure(error: &GenerationError) -> Self {
        Self::Notification {
            severity: Severity::Error,
            title: error.title().to_string(),
            message: error.user_message(),
            error_kind: Some(error.kind()),
        }
    }

    /// Create a response-ready message.
    pub fn response_ready(text: impl Into<String>) -> Self {
        Self::ResponseReady { text: text.into() }
    }

    /// Returns the message discriminant as a string.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Notification { .. } => "notification",
            Self::ResponseReady { .. } => "response_ready",
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    /// Interpret a reply to a generation request.
    pub fn into_generation_result(self) -> Result<GenerationResult, RelayError> {
        match self {
            Self::ResponseReady { text } => Ok(GenerationResult::success(text)),
            Self::Notification {
                severity: Severity::Error,
                message,
                error_kind,
                ..
            } => Ok(GenerationResult::failure(
                error_kind.unwrap_or(ErrorKind::Service),
                message,
            )),
            other => Err(RelayError::UnexpectedReply(other.kind_name().to_string())),
        }
    }
}

impl From<Result<String, GenerationError>> for Message {
    fn from(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(text) => Self::response_ready(text),
            Err(e) => Self::failure(&e),
        }
    }
}
