//! In-memory lock store
//!
//! Process-local implementation of `LockStore` backed by a `DashMap`.
//! Expired entries are treated as absent and replaced lazily on the next
//! write, so no background sweeper is needed.
//!
//! ## Example
//!
//! ```ignore
//! use idemp_providers::lock_store::InMemoryLockStore;
//!
//! let store = InMemoryLockStore::new();
//! // clones share the same entries
//! let same_store = store.clone();
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use idemp_domain::error::{Error, Result};
use idemp_domain::ports::LockStore;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct LockEntry {
    value: String,
    expires_at: Instant,
}

impl LockEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory lock store
///
/// Each operation runs under the map's shard lock for its key, which makes
/// the conditional writes atomic with respect to each other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLockStore {
    entries: Arc<DashMap<String, LockEntry>>,
}

impl InMemoryLockStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) records
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| e.is_live(now)).count()
    }

    /// Whether the store holds no live records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time left before the record under `key` expires
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.expires_at.saturating_duration_since(now))
    }

    /// Drop expired records, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| e.is_live(now));
        before.saturating_sub(self.entries.len())
    }

    fn deadline(now: Instant, ttl: Duration) -> Result<Instant> {
        now.checked_add(ttl)
            .ok_or_else(|| Error::invalid_argument(format!("Lock TTL {ttl:?} is out of range")))
    }
}

#[async_trait]
impl LockStore for InMemoryLockStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let now = Instant::now();
        let entry = LockEntry {
            value: value.to_string(),
            expires_at: Self::deadline(now, ttl)?,
        };

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live(now) {
                    Ok(false)
                } else {
                    occupied.insert(entry);
                    Ok(true)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                Ok(true)
            }
        }
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .remove_if(key, |_, e| e.is_live(now) && e.value == expected)
            .is_some())
    }

    async fn compare_and_expire(&self, key: &str, expected: &str, ttl: Duration) -> Result<bool> {
        let now = Instant::now();
        let expires_at = Self::deadline(now, ttl)?;

        match self.entries.get_mut(key) {
            Some(mut entry) if entry.is_live(now) && entry.value == expected => {
                entry.expires_at = expires_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
