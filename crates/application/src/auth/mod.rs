//! Session lifecycle and authenticated access.

mod context;
mod facade;
mod service;
mod session_handle;
mod token_store;

pub use context::SessionContext;
pub use facade::AuthenticatedClient;
pub use service::{AuthService, LOGIN_PATH, VERIFY_PATH};
pub use session_handle::SessionHandle;
pub use token_store::{StoredSession, TOKEN_KEY, TokenStore, USER_KEY};
