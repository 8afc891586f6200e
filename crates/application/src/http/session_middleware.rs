//! Middleware that ties the pipeline to the session.

use async_trait::async_trait;
use tracing::{info, warn};
use unifind_domain::response::{FORBIDDEN, UNAUTHORIZED};
use unifind_domain::{ApiRequest, ApiResponse};

use super::middleware::{Middleware, RequestContext, ResponseAction};
use crate::auth::SessionContext;

/// Attaches the session token to requests for non-public paths.
///
/// A request that already carries an `Authorization` header is left alone,
/// so an explicitly attached token is never duplicated.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    ctx: SessionContext,
}

impl BearerAuth {
    /// Creates the middleware.
    #[must_use]
    pub const fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Middleware for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer-auth"
    }

    async fn on_request(&self, request: &mut ApiRequest, _ctx: RequestContext) {
        if request.has_authorization() || self.ctx.policy.is_public_api(&request.path) {
            return;
        }
        if let Some(token) = self.ctx.session.token() {
            request.set_bearer(&token);
        }
    }
}

/// Reacts to authorization failures.
///
/// * 401 on a protected path: the session is dropped and, unless the user is
///   on a public page, the navigator is sent to the login page.
/// * 403 on a public path: the held token is treated as corrupted, dropped,
///   and the request is retried once without credentials.
#[derive(Debug, Clone)]
pub struct SessionInvalidation {
    ctx: SessionContext,
}

impl SessionInvalidation {
    /// Creates the middleware.
    #[must_use]
    pub const fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Middleware for SessionInvalidation {
    fn name(&self) -> &'static str {
        "session-invalidation"
    }

    async fn on_response(
        &self,
        request: &ApiRequest,
        response: &ApiResponse,
        ctx: RequestContext,
    ) -> ResponseAction {
        let public = self.ctx.policy.is_public_api(&request.path);
        match response.status {
            UNAUTHORIZED if !public => {
                warn!(path = %request.path, "server rejected the session");
                self.ctx.invalidate().await;
                let page = self.ctx.navigator.current_page();
                if !self.ctx.policy.is_public_page(&page) {
                    info!(from = %page, "redirecting to login");
                    self.ctx.navigator.navigate(&self.ctx.policy.login_page);
                }
                ResponseAction::Continue
            }
            FORBIDDEN if public && !ctx.is_retry() => {
                warn!(path = %request.path, "public endpoint refused the held token, retrying anonymously");
                self.ctx.invalidate().await;
                let mut anonymous = request.clone();
                anonymous.strip_authorization();
                ResponseAction::Retry(anonymous)
            }
            _ => ResponseAction::Continue,
        }
    }
}
