//! Middleware hooks around each HTTP exchange

use async_trait::async_trait;
use unifind_domain::{ApiRequest, ApiResponse};

/// Per-attempt information passed to every hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// 0 for the first attempt, 1 for the retry
    pub attempt: u32,
}

impl RequestContext {
    /// Returns true on a retried attempt.
    #[must_use]
    pub const fn is_retry(self) -> bool {
        self.attempt > 0
    }
}

/// What the pipeline should do after a response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseAction {
    /// Hand the response (or its error) to the caller.
    Continue,
    /// Send this request instead, at most once per call.
    Retry(ApiRequest),
}

/// A hook into the request pipeline.
///
/// Request hooks run in registration order before every attempt, including
/// retries. Response hooks run in the same order; the first `Retry` wins.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Rewrites the outgoing request.
    async fn on_request(&self, _request: &mut ApiRequest, _ctx: RequestContext) {}

    /// Inspects a response. Transport failures never reach this hook.
    async fn on_response(
        &self,
        _request: &ApiRequest,
        _response: &ApiResponse,
        _ctx: RequestContext,
    ) -> ResponseAction {
        ResponseAction::Continue
    }
}
