//! Clients for the lost & found, events and account endpoints.

mod accounts;
mod events;
mod lost;

pub use accounts::AccountsApi;
pub use events::EventsApi;
pub use lost::LostItemsApi;

use unifind_domain::{DomainError, DomainResult};

/// Checks that `id` can be used as a single path segment.
fn segment(id: &str) -> DomainResult<&str> {
    if id.is_empty() || id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidIdentifier(id.to_string()));
    }
    Ok(id)
}
