//! Unifind Domain - Core types
//!
//! This crate defines the domain model for the Unifind lost & found client:
//! sessions and token claims, route classification, outgoing requests,
//! decoded responses and the resource payloads.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod id;
pub mod request;
pub mod resources;
pub mod response;
pub mod route;

pub use auth::{
    Claims, ExpiryPolicy, Role, Session, SessionStatus, TokenError, UserProfile, decode_claims,
    decode_token,
};
pub use error::{DomainError, DomainResult};
pub use id::generate_request_id;
pub use request::{ApiRequest, HttpMethod, RequestBody};
pub use response::ApiResponse;
pub use route::{GuardDecision, RouteAccess, RoutePolicy};
