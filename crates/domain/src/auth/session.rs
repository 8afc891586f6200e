//! Client session state

use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// Lifecycle stage of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Persisted state has not been read yet.
    Unknown,
    /// Nobody is logged in.
    Anonymous,
    /// A token and its user are held.
    Authenticated,
}

/// What the client currently believes about the logged-in user.
///
/// A token and a user are either both present or both absent; the
/// constructors are the only way to build a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
    is_loading: bool,
}

impl Session {
    /// Session before start-up has read the token store.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }

    /// Nobody logged in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: false,
        }
    }

    /// Logged in with `token`, whose claims decode to `user`.
    #[must_use]
    pub const fn authenticated(token: String, user: UserProfile) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            is_loading: false,
        }
    }

    /// Bearer token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// User profile, if logged in.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// True until start-up has read persisted state.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True iff both token and user are held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// True if the logged-in user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }

    /// Lifecycle stage.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        if self.is_loading {
            SessionStatus::Unknown
        } else if self.is_authenticated() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unknown()
    }
}
