//! Request pipeline: the base-addressed client and its middleware chain.

mod client;
mod middleware;
mod session_middleware;

pub use client::{ApiClient, MAX_RETRIES, decode_json};
pub use middleware::{Middleware, RequestContext, ResponseAction};
pub use session_middleware::{BearerAuth, SessionInvalidation};
