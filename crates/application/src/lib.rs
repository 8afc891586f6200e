//! Unifind Application - Session lifecycle and API access
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport, key/value storage, navigation, clock)
//! - The request pipeline and its session middleware
//! - The auth service, the authenticated facade and the resource clients

pub mod api;
pub mod auth;
pub mod error;
pub mod http;
pub mod ports;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::{AccountsApi, EventsApi, LostItemsApi};
pub use auth::{AuthService, AuthenticatedClient, SessionContext, SessionHandle, TokenStore};
pub use error::{ApplicationError, ApplicationResult};
pub use http::{ApiClient, Middleware, ResponseAction};
pub use ports::{Clock, HttpTransport, KeyValueStorage, Navigator, StorageError, TransportError};
pub use view::ViewScope;
