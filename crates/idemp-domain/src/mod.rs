//! # Domain Layer
//!
//! Core types of the idempotency gate. Nothing in this crate talks to a
//! store, spawns a task or reads configuration; it only describes what a
//! guarded call is, how its outcome is classified and which ports the outer
//! layers must implement.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Protocol defaults (TTL, success marker, denial message) |
//! | [`value_objects`] | `InvocationKey`, `LockToken`, `CallDescriptor`, `CallOutcome`, ... |
//! | [`ports`] | `LockStore` and `CleanupDispatcher` contracts |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{CleanupDispatcher, LockStore};
pub use value_objects::{
    CallDescriptor, CallOutcome, CleanupTask, InvocationKey, LockToken, RaisedError, Transition,
};
