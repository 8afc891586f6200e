//! Base-addressed API client

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span, warn};
use unifind_domain::{ApiRequest, ApiResponse};

use super::middleware::{Middleware, RequestContext, ResponseAction};
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpTransport;

/// Upper bound on middleware-requested retries per call.
pub const MAX_RETRIES: u32 = 1;

/// HTTP client with a fixed base address and a middleware chain.
///
/// Non-2xx responses become [`ApplicationError::Status`] after the chain has
/// seen them; transport failures become [`ApplicationError::Network`].
pub struct ApiClient<T: HttpTransport> {
    transport: T,
    base_url: String,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl<T: HttpTransport> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "middleware",
                &self.middleware.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a client without middleware.
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            middleware: Vec::new(),
        }
    }

    /// Appends a middleware to the chain.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Returns the base address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a request through the middleware chain.
    ///
    /// # Errors
    ///
    /// Returns `Network` if no response arrived, `Status` for a non-2xx
    /// response and `Domain` if the path cannot be resolved.
    pub async fn send(&self, request: ApiRequest) -> ApplicationResult<ApiResponse> {
        let span = info_span!(
            "api_request",
            id = %request.id,
            method = %request.method,
            path = %request.path
        );
        self.send_inner(request).instrument(span).await
    }

    /// Sends a request and decodes a JSON body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus `Decode` for an unexpected body.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> ApplicationResult<R> {
        let response = self.send(request).await?;
        decode_json(&response)
    }

    async fn send_inner(&self, mut request: ApiRequest) -> ApplicationResult<ApiResponse> {
        let mut attempt = 0;
        loop {
            let ctx = RequestContext { attempt };
            for middleware in &self.middleware {
                middleware.on_request(&mut request, ctx).await;
            }

            let url = request.url(&self.base_url)?;
            let response = self.transport.execute(url, &request).await.map_err(|e| {
                warn!(error = %e, "request failed before a response arrived");
                ApplicationError::Network(e)
            })?;
            debug!(
                status = response.status,
                elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
                "response received"
            );

            let mut retry = None;
            for middleware in &self.middleware {
                if let ResponseAction::Retry(next) =
                    middleware.on_response(&request, &response, ctx).await
                {
                    debug!(middleware = middleware.name(), "retry requested");
                    retry = Some(next);
                    break;
                }
            }

            match retry {
                Some(next) if attempt < MAX_RETRIES => {
                    attempt += 1;
                    request = next;
                }
                _ => return into_result(response),
            }
        }
    }
}

fn into_result(response: ApiResponse) -> ApplicationResult<ApiResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApplicationError::Status {
            status: response.status,
            message: response.error_detail(),
        })
    }
}

/// Decodes a JSON response body.
///
/// # Errors
///
/// Returns `ApplicationError::Decode` if the body does not match `R`.
pub fn decode_json<R: DeserializeOwned>(response: &ApiResponse) -> ApplicationResult<R> {
    response
        .json()
        .map_err(|e| ApplicationError::Decode(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct AlwaysRetry {
        seen: AtomicU32,
    }

    #[async_trait]
    impl Middleware for AlwaysRetry {
        fn name(&self) -> &'static str {
            "always-retry"
        }

        async fn on_response(
            &self,
            request: &ApiRequest,
            _response: &ApiResponse,
            _ctx: RequestContext,
        ) -> ResponseAction {
            self.seen.fetch_add(1, Ordering::SeqCst);
            ResponseAction::Retry(request.clone())
        }
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let transport = FakeTransport::new();
        transport.respond_json(200, r#"[{"x":1}]"#);
        let client = ApiClient::new(transport, "http://api.test/");

        let body: serde_json::Value = client.send_json(ApiRequest::get("/lost")).await.unwrap();

        assert_eq!(body, serde_json::json!([{"x": 1}]));
        let sent = client.transport().requests();
        assert_eq!(sent[0].url, "http://api.test/lost");
    }

    #[tokio::test]
    async fn test_error_status_carries_detail() {
        let transport = FakeTransport::new();
        transport.respond_json(404, r#"{"detail":"Objeto no encontrado"}"#);
        let client = ApiClient::new(transport, "http://api.test");

        let err = client.send(ApiRequest::get("/lost/x")).await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Status { status: 404, ref message } if message == "Objeto no encontrado"
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let client = ApiClient::new(FakeTransport::new(), "http://api.test");
        let err = client.send(ApiRequest::get("/health")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Network(_)));
    }

    #[tokio::test]
    async fn test_retry_is_bounded() {
        let transport = FakeTransport::new();
        transport.respond_json(500, "{}");
        transport.respond_json(500, "{}");
        transport.respond_json(500, "{}");
        let retry = Arc::new(AlwaysRetry {
            seen: AtomicU32::new(0),
        });
        let client = ApiClient::new(transport, "http://api.test").with_middleware(retry.clone());

        let err = client.send(ApiRequest::get("/events")).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(client.transport().requests().len(), 2);
        assert_eq!(retry.seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_relative_path_is_rejected() {
        let client = ApiClient::new(FakeTransport::new(), "http://api.test");
        let err = client.send(ApiRequest::get("lost")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
        assert!(client.transport().requests().is_empty());
    }
}
