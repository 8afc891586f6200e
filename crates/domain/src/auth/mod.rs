//! Authentication domain types

mod claims;
mod expiry;
mod session;
mod user;

pub use claims::{Claims, TokenError, decode_claims, decode_token};
pub use expiry::ExpiryPolicy;
pub use session::{Session, SessionStatus};
pub use user::{Role, UserProfile};
