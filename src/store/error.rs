//! Error types for the snapshot store.

use thiserror::Error;

/// Error type for snapshot persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database error from `SQLite`.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Snapshot document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for snapshot persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        let err = StoreError::Storage("lock poisoned".to_string());
        assert_eq!(err.to_string(), "Storage error: lock poisoned");
    }

    #[test]
    fn serialize_error_wraps_serde_json() {
        let inner = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StoreError::from(inner);
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
