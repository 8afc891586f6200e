//! Key/value persistence port

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend is not available at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed persistent storage that survives restarts.
///
/// Absent keys read as `None`; removing an absent key is not an error.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads a value.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes a value.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
