//! Per-invocation session
//!
//! The session is the only place the lock token lives between admission and
//! completion. It is handed back to the dispatcher by value and consumed by
//! value, so it cannot outlive its invocation or be picked up by another one
//! running on a reused worker.

use idemp_domain::value_objects::{InvocationKey, LockToken};
use std::time::Duration;

/// Key, token and TTL of one admitted invocation
///
/// Not `Clone`: completing an invocation consumes its session.
#[derive(Debug, PartialEq, Eq)]
pub struct SessionContext {
    key: InvocationKey,
    token: LockToken,
    ttl: Duration,
}

impl SessionContext {
    /// Create a session for an acquired lock
    pub fn new(key: InvocationKey, token: LockToken, ttl: Duration) -> Self {
        Self { key, token, ttl }
    }

    /// Invocation key of the held record
    pub fn key(&self) -> &InvocationKey {
        &self.key
    }

    /// Token written into the held record
    pub fn token(&self) -> &LockToken {
        &self.token
    }

    /// TTL the record was acquired with
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Consume the session
    pub fn into_parts(self) -> (InvocationKey, LockToken, Duration) {
        (self.key, self.token, self.ttl)
    }
}
