//! Debounced refresh scheduling
//!
//! A burst of selection changes must produce a single refresh: the one for
//! the last change. `LatestRequest` hands out tickets where each new ticket
//! supersedes all earlier ones; `Debouncer` pairs it with a tokio timer task
//! that is aborted whenever a newer request arrives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default delay before a scheduled refresh fires
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Identifies one scheduled request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Latest-wins ticket counter
///
/// Cloning shares the counter, so a timer callback can hold a clone and ask
/// whether its ticket is still current when it fires.
#[derive(Debug, Clone, Default)]
pub struct LatestRequest {
    latest: Arc<AtomicU64>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the most recent
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate all outstanding tickets without issuing a new one
    pub fn supersede(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(feature = "runtime")]
pub use timer::Debouncer;

#[cfg(feature = "runtime")]
mod timer {
    use std::future::Future;
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::task::JoinHandle;

    use super::{LatestRequest, Ticket};

    /// Runs only the most recently scheduled callback, after a quiet period
    pub struct Debouncer {
        delay: Duration,
        latest: LatestRequest,
        pending: Mutex<Option<JoinHandle<()>>>,
    }

    impl Debouncer {
        pub fn new(delay: Duration) -> Self {
            Self {
                delay,
                latest: LatestRequest::new(),
                pending: Mutex::new(None),
            }
        }

        pub fn from_millis(millis: u64) -> Self {
            Self::new(Duration::from_millis(millis))
        }

        pub fn delay(&self) -> Duration {
            self.delay
        }

        /// Schedule `task` to run after the delay, cancelling any pending one
        ///
        /// Must be called from within a tokio runtime.
        pub fn schedule<F, Fut>(&self, task: F) -> Ticket
        where
            F: FnOnce() -> Fut + Send + 'static,
            Fut: Future<Output = ()> + Send + 'static,
        {
            let ticket = self.latest.issue();
            let latest = self.latest.clone();
            let delay = self.delay;

            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if latest.is_current(ticket) {
                    task().await;
                } else {
                    tracing::trace!(?ticket, "Debounced task superseded");
                }
            });

            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = pending.replace(handle) {
                previous.abort();
            }

            tracing::debug!(?ticket, delay_ms = delay.as_millis() as u64, "Scheduled refresh");
            ticket
        }

        /// Drop the pending task, if any
        pub fn cancel(&self) {
            self.latest.supersede();
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = pending.take() {
                previous.abort();
            }
        }

        /// Whether a scheduled task has yet to finish
        pub fn is_pending(&self) -> bool {
            let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            pending.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
        }
    }

    impl Drop for Debouncer {
        fn drop(&mut self) {
            self.cancel();
        }
    }
}
