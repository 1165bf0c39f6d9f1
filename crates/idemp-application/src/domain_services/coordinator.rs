//! Lock coordination against the shared store
//!
//! Every method here is one atomic store operation (refresh may fall back to
//! a second one). None of them return an error: store failures are logged
//! and folded into the result according to the protocol.

use idemp_domain::ports::LockStore;
use idemp_domain::value_objects::{CleanupTask, InvocationKey, LockToken};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What to do when the store cannot be reached while acquiring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Deny the call: a call that cannot be proven unique is not run
    #[default]
    FailClosed,
    /// Admit the call without a lock record
    FailOpen,
}

/// Result of an acquisition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// The record was created and holds this token
    Acquired(LockToken),
    /// Another holder owns the key (or the store failed under fail-closed)
    Blocked,
}

impl Acquisition {
    /// Whether the lock was obtained
    pub fn is_acquired(&self) -> bool {
        matches!(self, Self::Acquired(_))
    }

    /// The ownership token, if the lock was obtained
    pub fn into_token(self) -> Option<LockToken> {
        match self {
            Self::Acquired(token) => Some(token),
            Self::Blocked => None,
        }
    }
}

/// Atomic acquire / release / refresh / read over a [`LockStore`]
#[derive(Clone)]
pub struct LockCoordinator {
    store: Arc<dyn LockStore>,
    failure_policy: FailurePolicy,
}

impl LockCoordinator {
    /// Create a fail-closed coordinator
    pub fn new(store: Arc<dyn LockStore>) -> Self {
        Self {
            store,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Set the policy applied when acquisition hits a store error
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Policy applied when acquisition hits a store error
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Name of the underlying store provider
    pub fn provider_name(&self) -> &str {
        self.store.provider_name()
    }

    /// Try to create the lock record for `key` with a fresh token
    ///
    /// Under [`FailurePolicy::FailClosed`] a store error is reported as
    /// [`Acquisition::Blocked`]: a call whose uniqueness cannot be confirmed
    /// is denied.
    pub async fn acquire(&self, key: &InvocationKey, ttl: Duration) -> Acquisition {
        let token = LockToken::generate();
        match self
            .store
            .set_if_absent(key.as_str(), token.as_str(), ttl)
            .await
        {
            Ok(true) => {
                debug!(key = %key, ttl = ?ttl, "Lock acquired");
                Acquisition::Acquired(token)
            }
            Ok(false) => {
                debug!(key = %key, "Lock already held");
                Acquisition::Blocked
            }
            Err(e) => match self.failure_policy {
                FailurePolicy::FailClosed => {
                    error!(key = %key, error = %e, "Lock acquisition failed, denying call");
                    Acquisition::Blocked
                }
                FailurePolicy::FailOpen => {
                    warn!(key = %key, error = %e, "Lock acquisition failed, admitting call without lock");
                    Acquisition::Acquired(token)
                }
            },
        }
    }

    /// Delete the record for `key` if it still holds `token`
    ///
    /// Returns false when the record expired, was re-acquired by someone
    /// else, or the store failed. None of these are errors for the caller.
    pub async fn release(&self, key: &InvocationKey, token: &LockToken) -> bool {
        match self
            .store
            .compare_and_delete(key.as_str(), token.as_str())
            .await
        {
            Ok(true) => {
                debug!(key = %key, "Lock released");
                true
            }
            Ok(false) => {
                info!(key = %key, "Lock release skipped, record expired or owned by another token");
                false
            }
            Err(e) => {
                error!(key = %key, error = %e, "Lock release failed");
                false
            }
        }
    }

    /// Keep the record for `key` alive for another `ttl`
    ///
    /// With a known token the expiry is reset only if the record still holds
    /// it. Otherwise the record is re-armed with a set-if-absent under a new
    /// token, which never overwrites another holder.
    pub async fn refresh(
        &self,
        key: &InvocationKey,
        token: Option<&LockToken>,
        ttl: Duration,
    ) -> bool {
        if let Some(token) = token {
            match self
                .store
                .compare_and_expire(key.as_str(), token.as_str(), ttl)
                .await
            {
                Ok(true) => {
                    debug!(key = %key, ttl = ?ttl, "Lock refreshed");
                    return true;
                }
                Ok(false) => {
                    info!(key = %key, "Lock token no longer matches, re-arming");
                }
                Err(e) => {
                    error!(key = %key, error = %e, "Lock refresh failed");
                    return false;
                }
            }
        }

        let token = LockToken::generate();
        match self
            .store
            .set_if_absent(key.as_str(), token.as_str(), ttl)
            .await
        {
            Ok(rearmed) => {
                debug!(key = %key, rearmed, "Lock re-armed with set-if-absent");
                rearmed
            }
            Err(e) => {
                error!(key = %key, error = %e, "Lock re-arm failed");
                false
            }
        }
    }

    /// Best-effort read of the raw value stored under `key`
    pub async fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                error!(key = key, error = %e, "Lock store read failed");
                None
            }
        }
    }

    /// Execute a deferred cleanup task
    pub async fn run_cleanup(&self, task: CleanupTask) -> bool {
        match task {
            CleanupTask::Release { key, token } => self.release(&key, &token).await,
            CleanupTask::Refresh { key, token, ttl } => {
                self.refresh(&key, token.as_ref(), ttl).await
            }
        }
    }
}

impl fmt::Debug for LockCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockCoordinator")
            .field("store", &self.store.provider_name())
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}
