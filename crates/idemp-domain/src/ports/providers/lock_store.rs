//! Lock Store Port
//!
//! Contract for the shared key-value store that coordinates idempotency
//! locks across processes.
//!
//! ## Atomicity
//!
//! Every method is a single atomic operation on the store. The protocol never
//! reads a record and then writes it in a separate round trip; the two
//! conditional writes (`compare_and_delete`, `compare_and_expire`) must be
//! executed server-side as one step (a script on Redis).
//!
//! ## Errors
//!
//! Implementations report transport and protocol failures as
//! [`Error::StoreUnavailable`](crate::error::Error::StoreUnavailable). A
//! conditional operation whose condition does not hold is not an error; it
//! returns `Ok(false)`.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Lock Store Port
///
/// # Implementations
///
/// - **Redis**: standalone or cluster deployments; the adapter picks the
///   execution path for scripts according to the detected topology
/// - **In-memory**: single-process store with per-entry expiry, for tests
///
/// # Example
///
/// ```ignore
/// use idemp_domain::ports::LockStore;
/// use std::time::Duration;
///
/// if store.set_if_absent("order:42", "token-a", Duration::from_secs(30)).await? {
///     // we hold the record until it expires or is released
///     store.compare_and_delete("order:42", "token-a").await?;
/// }
/// ```
#[async_trait]
pub trait LockStore: Send + Sync + std::fmt::Debug {
    /// Store `value` under `key` with an expiry, only if `key` is absent
    ///
    /// # Returns
    /// True if the record was created, false if the key already existed
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    /// Delete `key` only if its current value equals `expected`
    ///
    /// # Returns
    /// True if the record was deleted, false if it was absent or held
    /// another value
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool>;

    /// Reset the expiry of `key` to `ttl` only if its value equals `expected`
    ///
    /// # Returns
    /// True if the expiry was updated, false if the record was absent or
    /// held another value
    async fn compare_and_expire(&self, key: &str, expected: &str, ttl: Duration) -> Result<bool>;

    /// Read the current value of `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "redis", "memory")
    fn provider_name(&self) -> &str;
}
