//! Persistent token storage.
//!
//! The token and the decoded user profile are kept under two fixed keys in a
//! [`KeyValueStorage`]. Reads are fail-soft: anything unreadable is reported
//! as absent so that start-up always reaches a definite session state.

use std::fmt;
use std::sync::Arc;

use unifind_domain::UserProfile;

use crate::ports::{KeyValueStorage, StorageError};

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-encoded [`UserProfile`].
pub const USER_KEY: &str = "user";

/// Whatever the store held at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSession {
    /// Raw token, if present
    pub token: Option<String>,
    /// Cached profile, if present and well-formed
    pub user: Option<UserProfile>,
}

impl StoredSession {
    /// Returns both halves, or `None` if either is missing.
    #[must_use]
    pub fn into_parts(self) -> Option<(String, UserProfile)> {
        self.token.zip(self.user)
    }
}

/// Token store backed by a key/value storage port.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Creates a store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Writes both keys. Overwrites any previous session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either write fails.
    pub async fn save(&self, token: &str, user: &UserProfile) -> Result<(), StorageError> {
        let user_json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set_item(TOKEN_KEY, token).await?;
        self.storage.set_item(USER_KEY, &user_json).await
    }

    /// Reads both keys. Storage failures read as absent, and a malformed
    /// profile makes the whole session absent.
    pub async fn load(&self) -> StoredSession {
        let token = self.read(TOKEN_KEY).await.filter(|t| !t.is_empty());
        let Some(raw_user) = self.read(USER_KEY).await else {
            return StoredSession { token, user: None };
        };
        match serde_json::from_str::<UserProfile>(&raw_user) {
            Ok(user) => StoredSession {
                token,
                user: Some(user),
            },
            Err(e) => {
                tracing::warn!(error = %e, "stored user profile is malformed");
                StoredSession::default()
            }
        }
    }

    /// Returns the stored token alone.
    pub async fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).await.filter(|t| !t.is_empty())
    }

    /// Removes both keys. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError`; the second key is still attempted.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let token = self.storage.remove_item(TOKEN_KEY).await;
        let user = self.storage.remove_item(USER_KEY).await;
        token.and(user)
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read from token storage");
                None
            }
        }
    }
}
