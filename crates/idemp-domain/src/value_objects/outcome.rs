//! Outcome Value Objects
//!
//! How a guarded operation ended, the state that ending leads to, and the
//! store work that state requires.

use crate::error::{Error, Result};
use crate::value_objects::invocation::{InvocationKey, LockToken};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Error raised by a guarded operation, as seen by the outcome evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaisedError {
    /// The admission gate's own denial; the invocation never held a lock
    DuplicateCall,
    /// Any other failure of the guarded operation
    Other(String),
}

/// Value Object: Call Outcome
///
/// Reported by the dispatcher once the guarded operation has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The operation returned normally; carries its JSON serialization
    Returned(String),
    /// The operation raised an error
    Raised(RaisedError),
}

impl CallOutcome {
    /// Build a `Returned` outcome by serializing the result value
    pub fn returned<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_string(value)
            .map(Self::Returned)
            .map_err(|e| Error::serialization(format!("result is not serializable: {e}")))
    }

    /// Build a `Raised` outcome from a domain error
    pub fn raised(error: &Error) -> Self {
        if error.is_duplicate_call() {
            Self::Raised(RaisedError::DuplicateCall)
        } else {
            Self::Raised(RaisedError::Other(error.to_string()))
        }
    }

    /// Build a `Raised` outcome from any foreign error
    pub fn raised_other<E: fmt::Display + ?Sized>(error: &E) -> Self {
        Self::Raised(RaisedError::Other(error.to_string()))
    }
}

/// State reached by an invocation once its outcome is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Result carried a success marker; the lock is re-armed to block retries
    SucceededSuppressing,
    /// Result lacked a success marker; the lock is released
    FailedReleasing,
    /// The operation raised; the lock is released
    ExceptedReleasing,
    /// The raised error was the gate's own denial; nothing is held
    ExceptedNoOp,
}

impl Transition {
    /// Whether this transition releases the lock record
    pub fn releases(self) -> bool {
        matches!(self, Self::FailedReleasing | Self::ExceptedReleasing)
    }

    /// Whether this transition keeps the lock record alive
    pub fn suppresses(self) -> bool {
        matches!(self, Self::SucceededSuppressing)
    }

    /// Store work required by this transition
    ///
    /// A release without a token cannot be performed safely: the record is
    /// left to expire on its own TTL and `None` is returned.
    pub fn cleanup_task(
        self,
        key: InvocationKey,
        token: Option<LockToken>,
        ttl: Duration,
    ) -> Option<CleanupTask> {
        match self {
            Self::SucceededSuppressing => Some(CleanupTask::Refresh { key, token, ttl }),
            Self::FailedReleasing | Self::ExceptedReleasing => {
                token.map(|token| CleanupTask::Release { key, token })
            }
            Self::ExceptedNoOp => None,
        }
    }

    /// Short name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SucceededSuppressing => "succeeded_suppressing",
            Self::FailedReleasing => "failed_releasing",
            Self::ExceptedReleasing => "excepted_releasing",
            Self::ExceptedNoOp => "excepted_noop",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deferred store work, executed off the caller's path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupTask {
    /// Delete the record if it still holds `token`
    Release {
        /// Lock record key
        key: InvocationKey,
        /// Token written at acquisition
        token: LockToken,
    },
    /// Keep the record alive for another `ttl`
    ///
    /// Without a token (or when the token no longer matches) the record is
    /// re-armed with a set-if-absent under a new token.
    Refresh {
        /// Lock record key
        key: InvocationKey,
        /// Token written at acquisition, if still known
        token: Option<LockToken>,
        /// Expiry applied to the re-armed record
        ttl: Duration,
    },
}

impl CleanupTask {
    /// Key of the record this task touches
    pub fn key(&self) -> &InvocationKey {
        match self {
            Self::Release { key, .. } | Self::Refresh { key, .. } => key,
        }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Release { .. } => "release",
            Self::Refresh { .. } => "refresh",
        }
    }
}
