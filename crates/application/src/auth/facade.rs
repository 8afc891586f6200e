//! Authenticated request facade

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;
use unifind_domain::{ApiRequest, ApiResponse, HttpMethod, RequestBody};

use super::service::AuthService;
use crate::error::{ApplicationError, ApplicationResult};
use crate::http::decode_json;
use crate::ports::HttpTransport;

/// Sends requests that require the current session.
///
/// The token is attached explicitly, so the call fails fast with
/// `NotAuthenticated` instead of reaching the server without one. A 401
/// answer ends the session and surfaces as `SessionExpired`.
pub struct AuthenticatedClient<T: HttpTransport> {
    auth: Arc<AuthService<T>>,
}

impl<T: HttpTransport> Clone for AuthenticatedClient<T> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
        }
    }
}

impl<T: HttpTransport> std::fmt::Debug for AuthenticatedClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("auth", &self.auth)
            .finish()
    }
}

impl<T: HttpTransport> AuthenticatedClient<T> {
    /// Creates a facade over `auth`.
    #[must_use]
    pub const fn new(auth: Arc<AuthService<T>>) -> Self {
        Self { auth }
    }

    /// Returns the auth service.
    #[must_use]
    pub const fn auth(&self) -> &Arc<AuthService<T>> {
        &self.auth
    }

    /// Sends `request` with the current token.
    ///
    /// # Errors
    ///
    /// * `NotAuthenticated` if no session is held; nothing is sent.
    /// * `SessionExpired` if the local expiry policy rejects the token or
    ///   the server answers 401; the session is ended first.
    /// * Any other error of the pipeline, unchanged.
    pub async fn execute(&self, request: ApiRequest) -> ApplicationResult<ApiResponse> {
        let token = self.auth.token().ok_or(ApplicationError::NotAuthenticated)?;
        if self.auth.is_locally_expired(&token) {
            info!("token expired locally, ending session");
            self.end_session().await;
            return Err(ApplicationError::SessionExpired);
        }

        match self.auth.client().send(request.with_bearer(&token)).await {
            Err(e) if e.is_unauthorized() => {
                self.end_session().await;
                Err(ApplicationError::SessionExpired)
            }
            other => other,
        }
    }

    /// Sends an authenticated request and decodes the JSON answer.
    ///
    /// # Errors
    ///
    /// As [`AuthenticatedClient::execute`], plus `Decode`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<RequestBody>,
    ) -> ApplicationResult<R> {
        let mut request = ApiRequest::new(method, path);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        let response = self.execute(request).await?;
        decode_json(&response)
    }

    /// Authenticated GET.
    ///
    /// # Errors
    ///
    /// As [`AuthenticatedClient::request`].
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApplicationResult<R> {
        self.request(HttpMethod::Get, path, None).await
    }

    /// Authenticated POST with a JSON body.
    ///
    /// # Errors
    ///
    /// As [`AuthenticatedClient::request`], plus `Domain` if `body` does
    /// not serialize.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> ApplicationResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let body = RequestBody::json(body)?;
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    /// Authenticated PUT with a JSON body.
    ///
    /// # Errors
    ///
    /// As [`AuthenticatedClient::post`].
    pub async fn put<B, R>(&self, path: &str, body: &B) -> ApplicationResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let body = RequestBody::json(body)?;
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    /// Authenticated DELETE; the response body is ignored.
    ///
    /// # Errors
    ///
    /// As [`AuthenticatedClient::execute`].
    pub async fn delete(&self, path: &str) -> ApplicationResult<()> {
        self.execute(ApiRequest::delete(path)).await.map(drop)
    }

    async fn end_session(&self) {
        if let Err(e) = self.auth.logout().await {
            tracing::error!(error = %e, "failed to clear token storage");
        }
    }
}
