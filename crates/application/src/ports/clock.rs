//! Time source for local token expiry

use chrono::{DateTime, Utc};

/// Supplies "now" when the expiry policy compares it against a token's `exp`.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}
