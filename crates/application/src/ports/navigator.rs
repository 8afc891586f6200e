//! Navigation port

/// Access to the page the user is currently on.
pub trait Navigator: Send + Sync {
    /// Returns the current page path, e.g. `/objetos-perdidos`.
    fn current_page(&self) -> String;

    /// Performs a full navigation to `page`, discarding in-memory UI state.
    fn navigate(&self, page: &str);
}
