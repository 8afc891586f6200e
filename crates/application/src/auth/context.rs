//! Collaborators shared by the auth service and the session middleware

use std::fmt;
use std::sync::Arc;

use unifind_domain::{RoutePolicy, Session};

use super::session_handle::SessionHandle;
use super::token_store::TokenStore;
use crate::ports::Navigator;

/// Everything needed to read, persist and invalidate the session.
///
/// Cloning is cheap; all clones share the same session and storage.
#[derive(Clone)]
pub struct SessionContext {
    /// Persisted copy of the session
    pub store: TokenStore,
    /// In-memory copy of the session
    pub session: SessionHandle,
    /// Path classification
    pub policy: Arc<RoutePolicy>,
    /// Page navigation
    pub navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("session", &self.session)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Creates a context with a fresh session and the default route policy.
    #[must_use]
    pub fn new(store: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            session: SessionHandle::new(),
            policy: Arc::new(RoutePolicy::default()),
            navigator,
        }
    }

    /// Replaces the route policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RoutePolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Drops both copies of the session. Storage failures are logged.
    pub(crate) async fn invalidate(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::error!(error = %e, "failed to clear token storage");
        }
        self.session.replace(Session::anonymous());
    }
}
