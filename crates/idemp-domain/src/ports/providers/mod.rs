//! External Provider Ports
//!
//! Ports for external services the protocol depends on.
//!
//! ## Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | LockStore | Shared key-value store with atomic conditional operations |

/// Lock store port
pub mod lock_store;

pub use lock_store::LockStore;
