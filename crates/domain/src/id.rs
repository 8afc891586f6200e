//! Request identifier generation.

use uuid::Uuid;

/// Generates a new UUID v7 as a string.
///
/// Every outgoing API request carries one so log lines from the
/// middleware chain and the transport can be correlated.
#[must_use]
pub fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}
