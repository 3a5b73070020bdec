// src/cancel.rs
// =============================================================================
// Cooperative cancellation for in-flight link checks.
//
// A Cancellation is a cheap, cloneable handle. Every link check races its
// HTTP request against `cancelled()`, so one call to `cancel()` (for example
// from a Ctrl-C handler) resolves all pending checks at once.
// =============================================================================

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct Cancellation {
    // The sender lives as long as any handle does, so `changed()` on the
    // receiver only ever wakes up because of a real cancellation.
    trigger: Arc<watch::Sender<bool>>,
    state: watch::Receiver<bool>,
}

impl Cancellation {
    pub fn new() -> Self {
        let (trigger, state) = watch::channel(false);
        Self {
            trigger: Arc::new(trigger),
            state,
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.trigger.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Completes once `cancel()` has been called on any clone of this handle.
    pub async fn cancelled(&self) {
        let mut state = self.state.clone();
        while !*state.borrow_and_update() {
            if state.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_handle_is_not_cancelled() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_is_seen_by_clones() {
        let cancel = Cancellation::new();
        let clone = cancel.clone();

        let waiter = tokio::spawn(async move { clone.cancelled().await });
        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish after cancel")
            .unwrap();
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_immediately_after_cancel() {
        let cancel = Cancellation::new();
        cancel.cancel();
        tokio::time::timeout(Duration::from_millis(100), cancel.cancelled())
            .await
            .expect("already-cancelled handle should resolve at once");
    }
}
