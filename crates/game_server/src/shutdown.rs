//! Shutdown coordination for graceful server shutdown.
//!
//! This module provides shared shutdown state used by the application shell to
//! stop the HTTP listener while letting in-flight requests finish.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::info;

/// Shared shutdown state for coordinating graceful shutdown across components.
#[derive(Debug, Clone)]
pub struct ShutdownState {
    /// Flag indicating shutdown has been initiated - no new connections are accepted
    shutdown_initiated: Arc<AtomicBool>,
    /// Flag indicating in-flight requests have drained
    shutdown_complete: Arc<AtomicBool>,
    /// Wakes tasks waiting in [`ShutdownState::wait_for_shutdown`]
    notify: Arc<Notify>,
}

impl ShutdownState {
    /// Creates a new shutdown state with both flags set to false.
    pub fn new() -> Self {
        Self {
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
            shutdown_complete: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Returns true if shutdown has been initiated.
    pub fn is_shutdown_initiated(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Acquire)
    }

    /// Returns true if shutdown is complete and final cleanup can begin.
    pub fn is_shutdown_complete(&self) -> bool {
        self.shutdown_complete.load(Ordering::Acquire)
    }

    /// Initiates shutdown - the listener stops accepting new connections.
    pub fn initiate_shutdown(&self) {
        self.shutdown_initiated.store(true, Ordering::Release);
        self.notify.notify_waiters();
        info!("🛑 Shutdown initiated - no new connections will be accepted");
    }

    /// Marks shutdown as complete - all in-flight requests have been served.
    pub fn complete_shutdown(&self) {
        self.shutdown_complete.store(true, Ordering::Release);
        info!("✅ All requests drained - ready for final cleanup");
    }

    /// Resolves once [`ShutdownState::initiate_shutdown`] has been called.
    pub async fn wait_for_shutdown(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent initiate is not missed.
        notified.as_mut().enable();

        if self.is_shutdown_initiated() {
            return;
        }
        notified.await;
    }
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_after_initiate() {
        let state = ShutdownState::new();
        let waiter = {
            let state = state.clone();
            tokio::spawn(async move { state.wait_for_shutdown().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!state.is_shutdown_initiated());
        state.initiate_shutdown();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake up")
            .expect("waiter task should not panic");
        assert!(state.is_shutdown_initiated());
        assert!(!state.is_shutdown_complete());

        state.complete_shutdown();
        assert!(state.is_shutdown_complete());
    }

    #[tokio::test]
    async fn test_wait_after_initiate_is_immediate() {
        let state = ShutdownState::default();
        state.initiate_shutdown();
        tokio::time::timeout(Duration::from_millis(100), state.wait_for_shutdown())
            .await
            .expect("already initiated shutdown should not block");
    }
}
