//! Debounced search input.
//!
//! Raw keystrokes arrive faster than we want to query, so each input change
//! schedules a delayed commit and cancels the previously scheduled one. Only
//! a commit that survives the full delay window reaches the receiver; the
//! consumer then resets pagination and issues the query.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delay window the dashboard uses between the last keystroke and the query.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

/// Cancellable debounce over a stream of input values.
///
/// Dropping the debouncer aborts any pending commit, so no stale query
/// fires after the owning view is torn down.
pub struct SearchDebouncer {
    delay: Duration,
    tx: mpsc::UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    /// Create a debouncer and the receiving end for committed terms.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Record an input change: cancel the previously scheduled commit (if
    /// any) and schedule a new one `delay` from now.
    pub fn input_changed(&mut self, value: impl Into<String>) {
        self.cancel();

        let value = value.into();
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(term = %value, "search term committed");
            // Send failure just means the consumer is gone; nothing to do.
            let _ = tx.send(value);
        }));
    }

    /// Abort the pending commit, if one is scheduled.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn rapid_inputs_collapse_to_the_last_value() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(DEFAULT_DEBOUNCE);

        debouncer.input_changed("a");
        debouncer.input_changed("an");
        debouncer.input_changed("ann");

        let committed = rx.recv().await.unwrap();
        assert_eq!(committed, "ann");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn new_input_restarts_the_delay_window() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(DEFAULT_DEBOUNCE);

        debouncer.input_changed("first");
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(1)).await;

        debouncer.input_changed("second");
        tokio::task::yield_now().await;

        // The first commit would have fired at t=2s; it must not.
        tokio::time::advance(Duration::from_millis(1_500)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv().unwrap(), "second");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_the_pending_commit() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(DEFAULT_DEBOUNCE);

        debouncer.input_changed("doomed");
        tokio::task::yield_now().await;
        debouncer.cancel();
        assert!(!debouncer.has_pending());

        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_like_teardown() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(DEFAULT_DEBOUNCE);

        debouncer.input_changed("stale");
        tokio::task::yield_now().await;
        drop(debouncer);

        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        // Channel is closed (sender dropped with the debouncer) and empty.
        assert!(rx.recv().await.is_none());
    }
}
