//! Session lifecycle: start-up restore, login, logout and verification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};
use unifind_domain::{
    ApiRequest, ExpiryPolicy, GuardDecision, RequestBody, Session, UserProfile, decode_claims,
};

use super::context::SessionContext;
use super::token_store::StoredSession;
use crate::error::{ApplicationError, ApplicationResult};
use crate::http::{ApiClient, BearerAuth, SessionInvalidation};
use crate::ports::{Clock, HttpTransport};

/// Login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";
/// Token verification endpoint.
pub const VERIFY_PATH: &str = "/auth/verify";

#[derive(Serialize)]
struct LoginRequest<'a> {
    correo: &'a str,
    #[serde(rename = "contraseña")]
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Owns the session and is the only writer of it.
///
/// Everything else reads through [`AuthService::session`] or a
/// subscription. The request pipeline shares the same [`SessionContext`]
/// so that an invalidation seen by the pipeline is visible here at once.
pub struct AuthService<T: HttpTransport> {
    client: Arc<ApiClient<T>>,
    ctx: SessionContext,
    clock: Arc<dyn Clock>,
    expiry: ExpiryPolicy,
}

impl<T: HttpTransport> std::fmt::Debug for AuthService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("client", &self.client)
            .field("ctx", &self.ctx)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> AuthService<T> {
    /// Builds the session pipeline over `transport` and the service on top.
    ///
    /// The client gets [`BearerAuth`] then [`SessionInvalidation`].
    pub fn new(
        transport: T,
        base_url: impl Into<String>,
        ctx: SessionContext,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let client = ApiClient::new(transport, base_url)
            .with_middleware(Arc::new(BearerAuth::new(ctx.clone())))
            .with_middleware(Arc::new(SessionInvalidation::new(ctx.clone())));
        Self {
            client: Arc::new(client),
            ctx,
            clock,
            expiry: ExpiryPolicy::default(),
        }
    }

    /// Sets the local expiry policy.
    #[must_use]
    pub const fn with_expiry_policy(mut self, expiry: ExpiryPolicy) -> Self {
        self.expiry = expiry;
        self
    }

    /// Returns the session pipeline.
    #[must_use]
    pub const fn client(&self) -> &Arc<ApiClient<T>> {
        &self.client
    }

    /// Returns the shared session context.
    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Returns a snapshot of the session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.ctx.session.current()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.ctx.session.subscribe()
    }

    /// Returns the current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.ctx.session.token()
    }

    /// Returns the current user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.ctx.session.user()
    }

    /// Returns true if a session is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Decides whether `page` may render for the current session.
    #[must_use]
    pub fn guard(&self, page: &str) -> GuardDecision {
        self.ctx.policy.guard_page(page, &self.session())
    }

    /// Restores the session from storage. Leaves the `Unknown` state.
    ///
    /// A stored session is adopted only if the token decodes, its claims
    /// match the stored user and the expiry policy accepts it. Anything
    /// else clears storage.
    pub async fn init(&self) -> Session {
        let stored = self.ctx.store.load().await;
        let session = match self.restore(stored) {
            Some(session) => {
                info!(user = ?session.user().map(|u| &u.email), "session restored");
                session
            }
            None => {
                if let Err(e) = self.ctx.store.clear().await {
                    warn!(error = %e, "failed to clear token storage");
                }
                Session::anonymous()
            }
        };
        self.ctx.session.replace(session.clone());
        session
    }

    fn restore(&self, stored: StoredSession) -> Option<Session> {
        let (token, user) = stored.into_parts()?;
        let claims = decode_claims(&token)
            .inspect_err(|e| warn!(error = %e, "stored token is malformed"))
            .ok()?;
        if claims.profile() != user {
            warn!("stored user does not match the token claims");
            return None;
        }
        if self.expiry.is_expired(&claims, self.clock.now()) {
            info!("stored token has expired");
            return None;
        }
        Some(Session::authenticated(token, user))
    }

    /// Exchanges credentials for a session.
    ///
    /// On success both copies of the session hold the new token and its
    /// decoded user. On failure the session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` wrapping the cause: a network error,
    /// a non-2xx status, an unexpected body, a malformed token, an already
    /// expired token or a storage failure.
    pub async fn login(&self, email: &str, password: &str) -> ApplicationResult<UserProfile> {
        self.try_login(email, password)
            .await
            .map_err(ApplicationError::authentication_failed)
            .inspect_err(|e| warn!(error = %e, "login failed"))
    }

    async fn try_login(&self, email: &str, password: &str) -> ApplicationResult<UserProfile> {
        let body = RequestBody::json(&LoginRequest {
            correo: email,
            password,
        })?;
        let LoginResponse { token } = self
            .client
            .send_json(ApiRequest::post(LOGIN_PATH).with_body(body))
            .await?;

        let claims = decode_claims(&token)?;
        if self.expiry.is_expired(&claims, self.clock.now()) {
            return Err(ApplicationError::SessionExpired);
        }
        let user = claims.profile();

        self.ctx.store.save(&token, &user).await?;
        self.ctx
            .session
            .replace(Session::authenticated(token, user.clone()));
        info!(user_id = %user.id, role = %user.role, "logged in");
        Ok(user)
    }

    /// Drops the session. Idempotent; never contacts the server.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the persisted copy could not be removed. The
    /// in-memory session is anonymous either way.
    pub async fn logout(&self) -> ApplicationResult<()> {
        let cleared = self.ctx.store.clear().await;
        self.ctx.session.replace(Session::anonymous());
        info!("logged out");
        cleared.map_err(ApplicationError::from)
    }

    /// Asks the server whether the held token is still accepted.
    ///
    /// A 401 ends the session and yields `false`.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, otherwise any
    /// non-401 failure of the call.
    pub async fn verify(&self) -> ApplicationResult<bool> {
        let token = self.token().ok_or(ApplicationError::NotAuthenticated)?;
        match self
            .client
            .send(ApiRequest::get(VERIFY_PATH).with_bearer(&token))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_unauthorized() => {
                self.logout().await?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns true if `token` fails the local expiry policy right now.
    pub(crate) fn is_locally_expired(&self, token: &str) -> bool {
        decode_claims(token).is_ok_and(|claims| self.expiry.is_expired(&claims, self.clock.now()))
    }
}
