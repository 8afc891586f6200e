//! JSON-file storage.
//!
//! Stores all keys in one JSON object in the platform config directory:
//! - Linux: ~/.config/unifind/storage.json
//! - macOS: ~/Library/Application Support/unifind/storage.json
//! - Windows: %APPDATA%/unifind/storage.json
//!
//! The file holds a bearer token, so it is written with owner-only
//! permissions on Unix.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use unifind_application::ports::{KeyValueStorage, StorageError};

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Returns `<config dir>/unifind/storage.json`, if a config dir exists.
#[must_use]
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("unifind").join("storage.json"))
}

/// Key/value storage persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates a storage at `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Creates a storage at [`default_storage_path`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the platform has no config dir.
    pub fn at_default_location() -> Result<Self, StorageError> {
        default_storage_path()
            .map(Self::new)
            .ok_or_else(|| StorageError::Unavailable("could not determine config directory".into()))
    }

    /// Returns the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => from_json_bytes(&bytes).map_err(to_storage_error),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = to_json_stable_bytes(items).map_err(to_storage_error)?;
        fs::write(&self.path, content).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        Ok(())
    }
}

fn to_storage_error(e: SerializationError) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await.unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "replacing unreadable storage file");
            BTreeMap::new()
        });
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = match self.read_all().await {
            Ok(items) => items,
            Err(StorageError::Serialization(_)) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        if items.remove(key).is_none() && fs::metadata(&self.path).await.is_err() {
            return Ok(());
        }
        self.write_all(&items).await
    }
}
