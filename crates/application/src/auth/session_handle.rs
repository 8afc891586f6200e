//! Shared, observable session state

use std::sync::Arc;

use tokio::sync::watch;
use unifind_domain::{Session, UserProfile};

/// Cloneable handle on the in-memory session.
///
/// Every clone observes the same state. Only the auth layer writes to it;
/// views read the current value or subscribe to changes.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: Arc<watch::Sender<Session>>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle {
    /// Creates a handle in the `Unknown` (loading) state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::unknown());
        Self { tx: Arc::new(tx) }
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Returns the current token, if authenticated.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().token().map(str::to_owned)
    }

    /// Returns the current user, if authenticated.
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.tx.borrow().user().cloned()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    pub(crate) fn replace(&self, session: Session) {
        tracing::debug!(status = ?session.status(), "session state changed");
        self.tx.send_replace(session);
    }
}
