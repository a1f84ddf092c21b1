//! Cancellable trailing-edge debounce timer

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owns at most one pending debounced action.
///
/// Scheduling replaces any pending action, so a burst of calls inside one
/// quiet period collapses to the newest action. Dropping the debouncer
/// cancels whatever is still pending; pending work is never left to the
/// runtime to clean up.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace the pending action with `action`, to run after the quiet period.
    ///
    /// Cancellation is only effective while the quiet period is still
    /// running: once it elapses, the action is dispatched as its own task
    /// and runs to completion regardless of later `cancel` or drop.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Past the debounce boundary; a detached task cannot be aborted
            // through this handle anymore.
            tokio::spawn(action);
        }));
    }

    /// Abort the pending action, if its quiet period has not elapsed yet
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether an action is still waiting for its quiet period to elapse
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
