//! Trailing-edge debouncer for interactive re-renders.
//!
//! Values sent with [`Debouncer::trigger`] are coalesced: the callback runs
//! once with the latest value after no new value has arrived for the whole
//! window. A newer trigger restarts the window and replaces the pending
//! value. [`Debouncer::close`] flushes whatever is still pending.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    handle: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task on the current runtime.
    ///
    /// `on_settle` runs on that task, so it should not hold locks the
    /// triggering side needs.
    pub fn spawn<F>(window: Duration, mut on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let handle = tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => latest = value,
                            // Sender dropped: flush now.
                            None => break,
                        },
                        () = tokio::time::sleep(window) => break,
                    }
                }
                on_settle(latest);
            }
            tracing::debug!("debouncer stopped");
        });

        Self { tx, handle }
    }

    /// Schedule `value`, superseding any pending one.
    ///
    /// Returns `false` if the task has already exited.
    pub fn trigger(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }

    /// Stop accepting values, flush the pending one, and wait for the task.
    pub async fn close(self) -> Result<(), JoinError> {
        drop(self.tx);
        self.handle.await
    }
}
