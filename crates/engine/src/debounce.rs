//! Cancel-and-reschedule deferred work.
//!
//! A [`Debouncer`] holds the cancellation handle of the one pending unit
//! of work. Scheduling cancels whatever was pending and starts a fresh
//! quiescence timer, so within a burst of triggers only the last one
//! ever executes its body. Cancellation applies to pending work only;
//! work that has already started is left to complete.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Schedules a single unit of deferred work, replacing any pending one.
pub struct Debouncer {
    window: Duration,
    /// Handle of the currently pending (not yet started) work, if any.
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiescence window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    /// The quiescence window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `work` to run once the window elapses without another
    /// call. Any previously scheduled, not-yet-started work is cancelled
    /// and never runs its body.
    pub async fn schedule<F>(&self, work: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.take() {
            previous.cancel();
        }

        let token = CancellationToken::new();
        *pending = Some(token.clone());
        let window = self.window;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(window) => {
                    work.await;
                }
            }
        });
    }

    /// Cancel any pending work without scheduling a replacement.
    pub async fn cancel(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.cancel();
        }
    }
}
