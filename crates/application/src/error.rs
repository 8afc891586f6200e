//! Application error types

use thiserror::Error;
use unifind_domain::{DomainError, TokenError, response::UNAUTHORIZED};

use crate::ports::{StorageError, TransportError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A token could not be decoded.
    #[error("malformed token: {0}")]
    MalformedToken(#[from] TokenError),

    /// Login did not produce a usable session. Wraps the underlying cause.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(#[source] Box<ApplicationError>),

    /// A protected call was attempted without a session.
    #[error("not authenticated, please log in")]
    NotAuthenticated,

    /// The server (or the local expiry check) rejected the session.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Server-provided detail, or a generic message
        message: String,
    },

    /// A 2xx response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The token store could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ApplicationError {
    /// Wraps `cause` as a failed login.
    #[must_use]
    pub fn authentication_failed(cause: Self) -> Self {
        match cause {
            already @ Self::AuthenticationFailed(_) => already,
            other => Self::AuthenticationFailed(Box::new(other)),
        }
    }

    /// Returns the HTTP status if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for a 401 answer.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(UNAUTHORIZED))
    }

    /// Returns true if the user has to log in (again) to proceed.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::SessionExpired)
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
