//! Cleanup Dispatcher Port
//!
//! Defines the contract for running release/refresh work after a guarded
//! call has already returned to its caller.

use crate::value_objects::CleanupTask;

/// Hands cleanup tasks to an asynchronous execution unit
///
/// `dispatch` must not block and must not fail: a task that cannot be
/// scheduled is logged and dropped, leaving the record to its TTL.
pub trait CleanupDispatcher: Send + Sync {
    /// Schedule a task for background execution
    fn dispatch(&self, task: CleanupTask);
}
