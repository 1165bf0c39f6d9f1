//! Lock Store Provider Implementations
//!
//! Backends for the shared record store that holds idempotency locks.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryLockStore`] | Local | Concurrent map with per-entry expiry |
//! | [`RedisLockStore`] | Distributed | Redis standalone or cluster |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: Use `InMemoryLockStore`
//! - **Multi Instance**: Use `RedisLockStore`; locks are only meaningful
//!   across processes when every process talks to the same store

#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;

#[cfg(feature = "store-memory")]
pub use memory::InMemoryLockStore;
#[cfg(feature = "store-redis")]
pub use redis::{RedisLockStore, RedisTopology};
