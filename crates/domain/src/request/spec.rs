//! Outgoing API request

use url::Url;

use super::{AUTHORIZATION, Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};
use crate::id::generate_request_id;

/// An API request addressed by path relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Correlation id for logging
    pub id: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Path starting with `/`, e.g. `/lost/42/claim`
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
}

impl ApiRequest {
    /// Creates a request with a fresh id and no headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: generate_request_id(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Headers::new(),
            body: RequestBody::None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets `Authorization: Bearer <token>`, replacing any previous value.
    #[must_use]
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.set_bearer(token);
        self
    }

    /// Sets `Authorization: Bearer <token>` in place.
    pub fn set_bearer(&mut self, token: &str) {
        self.headers.set(AUTHORIZATION, format!("Bearer {token}"));
    }

    /// Removes every Authorization header. Returns true if one was present.
    pub fn strip_authorization(&mut self) -> bool {
        self.headers.remove(AUTHORIZATION) > 0
    }

    /// Returns true if an Authorization header is set.
    #[must_use]
    pub fn has_authorization(&self) -> bool {
        self.headers.contains(AUTHORIZATION)
    }

    /// Resolves the absolute URL against a base such as `http://localhost:8000`.
    ///
    /// Query parameters are not included; the transport appends them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the path is not absolute or the
    /// combined URL does not parse.
    pub fn url(&self, base: &str) -> DomainResult<Url> {
        if !self.path.starts_with('/') {
            return Err(DomainError::InvalidUrl(format!(
                "path must start with '/': {}",
                self.path
            )));
        }
        let joined = format!("{}{}", base.trim_end_matches('/'), self.path);
        Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))
    }
}
