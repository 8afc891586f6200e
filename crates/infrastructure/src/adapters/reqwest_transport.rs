//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. It performs exactly one
//! exchange per call and never interprets status codes.

use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};
use unifind_application::ports::{HttpTransport, TransportError};
use unifind_domain::{
    ApiRequest, ApiResponse,
    request::{FormPart, Header, Headers, HttpMethod, MultipartForm, RequestBody},
};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport.
    ///
    /// Redirects are followed up to 10 hops; TLS verification is on.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Creates a transport around a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        match body {
            RequestBody::None => Ok(builder),
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(value)
                    .map_err(|e| TransportError::InvalidBody(format!("invalid JSON: {e}")))?;
                Ok(builder.body(bytes))
            }
            // reqwest sets the content type with the boundary.
            RequestBody::Multipart(form) => Ok(builder.multipart(Self::build_form(form)?)),
        }
    }

    fn build_form(form: &MultipartForm) -> Result<Form, TransportError> {
        form.parts()
            .iter()
            .try_fold(Form::new(), |acc, part| match part {
                FormPart::Text { name, value } => Ok(acc.text(name.clone(), value.clone())),
                FormPart::File { name, file } => {
                    let part = Part::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.content_type)
                        .map_err(|e| {
                            TransportError::InvalidBody(format!(
                                "invalid MIME type '{}': {e}",
                                file.content_type
                            ))
                        })?;
                    Ok(acc.part(name.clone(), part))
                }
            })
    }

    fn map_error(error: &reqwest::Error, timeout: Duration) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        if error.is_connect() {
            let message = error.to_string();
            if message.to_lowercase().contains("certificate") || message.contains("tls") {
                return TransportError::Tls(message);
            }
            return TransportError::Connection {
                host: error
                    .url()
                    .and_then(Url::host_str)
                    .unwrap_or("unknown")
                    .to_string(),
                message,
            };
        }

        if error.is_builder() || error.is_body() {
            return TransportError::InvalidBody(error.to_string());
        }

        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, mut url: Url, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(self.timeout)
            .header("X-Request-Id", &request.id);

        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        if let Some(content_type) = request.body.content_type()
            && !request.headers.contains("content-type")
        {
            builder = builder.header("Content-Type", content_type);
        }

        builder = Self::build_body(builder, &request.body)?;

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout))?;

        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .map(|(k, v)| Header::new(k.as_str(), v.to_str().unwrap_or("<binary>")))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(ApiResponse::new(status, headers, body, start.elapsed()))
    }
}
