//! Message relay errors.

use std::time::Duration;

use thiserror::Error;

use crate::message::ContextKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Context not available: {0}")]
    TargetUnavailable(ContextKind),

    #[error("Channel closed before a reply was sent")]
    NoReply,

    #[error("No reply within {0:?}")]
    Timeout(Duration),

    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_unavailable() {
        let err = RelayError::TargetUnavailable(ContextKind::Content);
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn test_timeout_display() {
        let err = RelayError::Timeout(Duration::from_millis(250));
        assert!(err.to_string().contains("250ms"));
    }

    #[test]
    fn test_no_reply() {
        assert!(RelayError::NoReply.to_string().contains("closed"));
    }
}
