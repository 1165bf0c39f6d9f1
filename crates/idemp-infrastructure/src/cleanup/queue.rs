//! Cleanup task queue
//!
//! A bounded channel drained by a single worker task that executes
//! [`CleanupTask`]s through a [`LockCoordinator`].
//!
//! ## Behavior
//!
//! | Situation | Effect |
//! |-----------|--------|
//! | Queue has room | Task runs in FIFO order on the worker |
//! | Queue full or closed | Task dropped with a `warn`; the record expires by TTL |
//! | `flush()` | Resolves once every task queued before it has run |
//! | `shutdown()` | Stops accepting tasks, drains the backlog, joins the worker |

use crate::error_ext::ErrorContext;
use idemp_application::LockCoordinator;
use idemp_domain::error::{Error, Result};
use idemp_domain::ports::CleanupDispatcher;
use idemp_domain::value_objects::CleanupTask;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

enum Message {
    Task(CleanupTask),
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Counters kept by the queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupStats {
    /// Tasks that changed the store (released or refreshed a record)
    pub applied: u64,
    /// Tasks that ran but found nothing to do, or hit a store error
    pub skipped: u64,
    /// Tasks rejected because the queue was full or closed
    pub dropped: u64,
}

#[derive(Debug, Default)]
struct Counters {
    applied: AtomicU64,
    skipped: AtomicU64,
    dropped: AtomicU64,
}

/// Bounded cleanup queue with one worker
pub struct CleanupQueue {
    sender: mpsc::Sender<Message>,
    worker: Mutex<Option<JoinHandle<()>>>,
    counters: Arc<Counters>,
    capacity: usize,
}

impl CleanupQueue {
    /// Start the worker on the current Tokio runtime
    pub fn spawn(coordinator: LockCoordinator, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_argument("Cleanup queue capacity cannot be 0"));
        }
        let runtime = Handle::try_current().context("Cleanup queue needs a Tokio runtime")?;

        let (sender, receiver) = mpsc::channel(capacity);
        let counters = Arc::new(Counters::default());
        let worker = runtime.spawn(run_worker(receiver, coordinator, Arc::clone(&counters)));

        debug!(capacity, "Cleanup queue started");
        Ok(Self {
            sender,
            worker: Mutex::new(Some(worker)),
            counters,
            capacity,
        })
    }

    /// Maximum number of buffered tasks
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the queue counters
    pub fn stats(&self) -> CleanupStats {
        CleanupStats {
            applied: self.counters.applied.load(Ordering::Relaxed),
            skipped: self.counters.skipped.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }

    /// Wait until every task queued before this call has run
    ///
    /// Returns immediately once the queue has been shut down.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(Message::Flush(done)).await.is_ok() {
            let _ = wait.await;
        }
    }

    /// Stop accepting tasks, run everything already queued, join the worker
    pub async fn shutdown(&self) {
        let _ = self.sender.send(Message::Shutdown).await;

        let worker = self.worker.lock().ok().and_then(|mut worker| worker.take());
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                error!(error = %e, "Cleanup worker terminated abnormally");
            }
            debug!(stats = ?self.stats(), "Cleanup queue stopped");
        }
    }
}

impl CleanupDispatcher for CleanupQueue {
    fn dispatch(&self, task: CleanupTask) {
        let Err(err) = self.sender.try_send(Message::Task(task)) else {
            return;
        };

        let reason = match &err {
            TrySendError::Full(_) => "queue full",
            TrySendError::Closed(_) => "queue closed",
        };
        self.counters.dropped.fetch_add(1, Ordering::Relaxed);
        if let Message::Task(task) = err.into_inner() {
            warn!(
                key = %task.key(),
                task = task.kind(),
                reason,
                "Cleanup task dropped, record left to expire by TTL"
            );
        }
    }
}

impl fmt::Debug for CleanupQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupQueue")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<Message>,
    coordinator: LockCoordinator,
    counters: Arc<Counters>,
) {
    while let Some(message) = receiver.recv().await {
        match message {
            Message::Task(task) => {
                let key = task.key().clone();
                let kind = task.kind();
                if coordinator.run_cleanup(task).await {
                    counters.applied.fetch_add(1, Ordering::Relaxed);
                } else {
                    counters.skipped.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %key, task = kind, "Cleanup task had no effect");
                }
            }
            Message::Flush(done) => {
                let _ = done.send(());
            }
            Message::Shutdown => receiver.close(),
        }
    }
}
