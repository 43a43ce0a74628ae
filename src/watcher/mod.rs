//! Watcher module
//!
//! Drives periodic reconciliation of resource lists. Each list gets its own
//! task, refreshed on a fixed tick or on demand, and results are reported
//! over a channel so the view layer never blocks on the cluster.

mod registry;

pub use registry::*;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;

use crate::resource::{Lister, Table};

/// Event emitted after each reconciliation attempt
#[derive(Debug, Clone)]
pub enum RefreshEvent {
    /// A new snapshot was published
    Updated {
        kind: &'static str,
        namespace: String,
        table: Arc<Table>,
    },
    /// Reconciliation failed; the previous snapshot stays visible
    Error { kind: &'static str, message: String },
}

struct Watch {
    refresh: Arc<Notify>,
    handle: JoinHandle<()>,
}

/// Manages the refresh tasks of several lists
///
/// Lists are independent: each task serializes its own reconciliations and
/// no ordering exists between tasks.
pub struct ListWatcher {
    interval: Duration,
    event_tx: mpsc::UnboundedSender<RefreshEvent>,
    watches: Vec<Watch>,
}

impl ListWatcher {
    /// Create a new ListWatcher refreshing every `interval`
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<RefreshEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                interval,
                event_tx: tx,
                watches: Vec::new(),
            },
            rx,
        )
    }

    /// Start refreshing `list`. Returns the index to use with [`ListWatcher::refresh`].
    pub fn watch(&mut self, list: Arc<dyn Lister>) -> usize {
        let refresh = Arc::new(Notify::new());
        let trigger = Arc::clone(&refresh);
        let event_tx = self.event_tx.clone();
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut error_count = 0u32;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = trigger.notified() => {}
                }

                let event = match list.reconcile().await {
                    Ok(()) => {
                        error_count = 0;
                        RefreshEvent::Updated {
                            kind: list.kind(),
                            namespace: list.namespace().to_string(),
                            table: list.data(),
                        }
                    }
                    Err(e) => {
                        error_count += 1;
                        // Only report errors occasionally to avoid spam
                        if error_count != 1 && !error_count.is_multiple_of(10) {
                            continue;
                        }
                        RefreshEvent::Error {
                            kind: list.kind(),
                            message: format!("{} ({} consecutive)", e, error_count),
                        }
                    }
                };

                if event_tx.send(event).is_err() {
                    tracing::debug!("{} refresh receiver dropped, stopping", list.kind());
                    break;
                }
            }
        });

        self.watches.push(Watch { refresh, handle });
        self.watches.len() - 1
    }

    /// Request an immediate refresh of one list
    pub fn refresh(&self, index: usize) {
        if let Some(watch) = self.watches.get(index) {
            watch.refresh.notify_one();
        }
    }

    /// Request an immediate refresh of every list
    pub fn refresh_all(&self) {
        for watch in &self.watches {
            watch.refresh.notify_one();
        }
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Abort all refresh tasks
    ///
    /// A reconciliation in flight is dropped before it publishes, leaving its
    /// list untouched.
    pub fn stop(&mut self) {
        for watch in &self.watches {
            watch.handle.abort();
        }
        self.watches.clear();
    }
}

impl Drop for ListWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
