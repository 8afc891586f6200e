//! Navigator for a terminal session

use std::sync::{Mutex, PoisonError};

use tracing::warn;
use unifind_application::ports::Navigator;

/// Tracks the "page" a command runs on and reports redirects on stderr.
///
/// There is no page to reload in a terminal, so a forced navigation only
/// records the new page and tells the user what happened.
#[derive(Debug)]
pub struct ConsoleNavigator {
    page: Mutex<String>,
}

impl ConsoleNavigator {
    /// Starts on `page`.
    #[must_use]
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: Mutex::new(page.into()),
        }
    }
}

impl Navigator for ConsoleNavigator {
    fn current_page(&self) -> String {
        self.page
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn navigate(&self, page: &str) {
        let mut current = self.page.lock().unwrap_or_else(PoisonError::into_inner);
        warn!(from = %current, to = page, "session ended, redirecting");
        eprintln!("Session ended. Run `unifind login` to sign in again.");
        page.clone_into(&mut current);
    }
}
