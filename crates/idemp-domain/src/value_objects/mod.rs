//! Domain Value Objects
//!
//! Immutable values passed between the phases of one guarded invocation.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`InvocationKey`] | Deterministic fingerprint identifying one logical call |
//! | [`LockToken`] | Ownership proof stored as the lock record's value |
//! | [`CallDescriptor`] | What the dispatcher knows about a call before it runs |
//! | [`CallOutcome`] | What the guarded operation did |
//! | [`Transition`] | Outcome state reached by an admitted invocation |
//! | [`CleanupTask`] | Deferred store work decided by the outcome |

/// Invocation identity value objects
pub mod invocation;
/// Outcome and cleanup value objects
pub mod outcome;

pub use invocation::{CallDescriptor, InvocationKey, LockToken};
pub use outcome::{CallOutcome, CleanupTask, RaisedError, Transition};
