//! Settings store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Corrupt value for {key}: {message}")]
    Corrupt { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_error() {
        let err = StoreError::Unavailable("disk full".to_string());
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_corrupt_error() {
        let err = StoreError::Corrupt {
            key: "settings".to_string(),
            message: "expected object".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("settings"));
        assert!(display.contains("expected object"));
    }
}
