//! Wiring of the client stack

use std::sync::Arc;

use unifind_application::ports::{Clock, HttpTransport, KeyValueStorage, Navigator};
use unifind_application::{
    AccountsApi, AuthService, AuthenticatedClient, EventsApi, LostItemsApi, SessionContext,
    StorageError, TokenStore,
};
use unifind_infrastructure::{ClientConfig, FileStorage, MemoryStorage};

/// The assembled client: session, pipeline and resource clients.
pub struct App<T: HttpTransport> {
    auth: Arc<AuthService<T>>,
    lost: LostItemsApi<T>,
    events: EventsApi<T>,
    users: AccountsApi<T>,
}

impl<T: HttpTransport> App<T> {
    /// Builds the stack over `transport`. The session is still `Unknown`;
    /// call [`App::start`] before anything else.
    pub fn new(
        transport: T,
        config: &ClientConfig,
        storage: Arc<dyn KeyValueStorage>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ctx = SessionContext::new(TokenStore::new(storage), navigator);
        let auth = Arc::new(
            AuthService::new(transport, config.api_base_url.clone(), ctx, clock)
                .with_expiry_policy(config.expiry),
        );
        let authed = AuthenticatedClient::new(Arc::clone(&auth));
        Self {
            lost: LostItemsApi::new(authed.clone()),
            events: EventsApi::new(authed.clone()),
            users: AccountsApi::new(authed),
            auth,
        }
    }

    /// Restores the persisted session.
    pub async fn start(&self) {
        self.auth.init().await;
    }

    /// Session owner.
    #[must_use]
    pub const fn auth(&self) -> &Arc<AuthService<T>> {
        &self.auth
    }

    /// `/lost` client.
    #[must_use]
    pub const fn lost(&self) -> &LostItemsApi<T> {
        &self.lost
    }

    /// `/events` client.
    #[must_use]
    pub const fn events(&self) -> &EventsApi<T> {
        &self.events
    }

    /// `/admin/users/` client.
    #[must_use]
    pub const fn users(&self) -> &AccountsApi<T> {
        &self.users
    }
}

/// Picks the token storage: in memory when `ephemeral`, otherwise the
/// configured file or the platform default.
///
/// # Errors
///
/// Returns `StorageError::Unavailable` if no file location can be found.
pub fn storage_for(
    config: &ClientConfig,
    ephemeral: bool,
) -> Result<Arc<dyn KeyValueStorage>, StorageError> {
    if ephemeral {
        return Ok(Arc::new(MemoryStorage::new()));
    }
    let storage = match &config.storage_path {
        Some(path) => FileStorage::new(path),
        None => FileStorage::at_default_location()?,
    };
    tracing::debug!(path = %storage.path().display(), "using file token storage");
    Ok(Arc::new(storage))
}
