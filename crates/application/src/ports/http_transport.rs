//! HTTP transport port

use std::future::Future;

use thiserror::Error;
use unifind_domain::{ApiRequest, ApiResponse};
use url::Url;

/// Failures that happen before any HTTP status is received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request exceeded the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// The server could not be reached.
    #[error("could not connect to {host}: {message}")]
    Connection {
        /// Target host
        host: String,
        /// Underlying error text
        message: String,
    },

    /// TLS negotiation failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The request body could not be encoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Anything else the HTTP stack reports.
    #[error("{0}")]
    Other(String),
}

/// Port for sending a single HTTP exchange.
///
/// Implementations perform no retries and no status interpretation; every
/// response that arrives, whatever its status, is returned as `Ok`.
pub trait HttpTransport: Send + Sync {
    /// Sends `request` to the already resolved `url`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response was received.
    fn execute(
        &self,
        url: Url,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
