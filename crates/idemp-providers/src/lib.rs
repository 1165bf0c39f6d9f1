//! # idemp - Provider Implementations
//!
//! Lock store adapters implementing the `LockStore` port defined in
//! `idemp-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Lock Store | `LockStore` | Redis (standalone, cluster), InMemory |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! idemp-providers = { version = "0.1", default-features = false, features = ["store-memory"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use idemp_providers::lock_store::{InMemoryLockStore, RedisLockStore, RedisTopology};
//!
//! let local = InMemoryLockStore::new();
//! let shared = RedisLockStore::connect(&["redis://localhost:6379".into()], RedisTopology::Auto).await?;
//! ```

// Re-export idemp-domain types commonly used with providers
pub use idemp_domain::error::{Error, Result};
pub use idemp_domain::ports::LockStore;

/// Provider-specific constants
pub mod constants;

/// Lock store provider implementations
///
/// Implements `LockStore` for Redis and for a process-local map.
pub mod lock_store;
