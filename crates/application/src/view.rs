//! Guard against updates landing after a view has gone away.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Lifetime of a view that starts asynchronous work.
///
/// Work run through [`ViewScope::run`] yields `None` once the scope has
/// been unmounted, so results never reach a view that no longer exists.
/// Clones share the same lifetime.
#[derive(Debug, Clone)]
pub struct ViewScope {
    unmounted: Arc<watch::Sender<bool>>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    /// Creates a mounted scope.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            unmounted: Arc::new(tx),
        }
    }

    /// Returns true until [`ViewScope::unmount`] is called.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !*self.unmounted.borrow()
    }

    /// Ends the scope. Pending work is dropped.
    pub fn unmount(&self) {
        self.unmounted.send_replace(true);
    }

    /// Runs `future` unless the scope ends first.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        let mut rx = self.unmounted.subscribe();
        if *rx.borrow_and_update() {
            return None;
        }
        tokio::select! {
            output = future => self.is_mounted().then_some(output),
            _ = rx.wait_for(|unmounted| *unmounted) => {
                tracing::debug!("view unmounted, discarding pending result");
                None
            }
        }
    }
}
