//! Admission Gate Use Case
//!
//! Entry point used by dispatchers: `admit` before the guarded operation,
//! `complete` after it. Also exposes the manual lock API for callers that
//! guard an arbitrary key outside automatic call interception.

use crate::domain_services::{
    Acquisition, FingerprintGenerator, LockCoordinator, OutcomeEvaluator, SessionContext,
};
use idemp_domain::constants::{DEFAULT_DENIAL_MESSAGE, DEFAULT_LOCK_TTL_MS};
use idemp_domain::error::{Error, Result};
use idemp_domain::ports::CleanupDispatcher;
use idemp_domain::value_objects::{
    CallDescriptor, CallOutcome, CleanupTask, InvocationKey, LockToken, Transition,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Admission gate
///
/// Composes fingerprinting, lock coordination and outcome evaluation.
/// Cleanup decided at completion is handed to a [`CleanupDispatcher`] and
/// never delays the caller.
#[derive(Clone)]
pub struct AdmissionGate {
    fingerprints: FingerprintGenerator,
    coordinator: LockCoordinator,
    evaluator: OutcomeEvaluator,
    cleanup: Arc<dyn CleanupDispatcher>,
    default_ttl: Duration,
    denial_message: String,
}

impl AdmissionGate {
    /// Create a gate with default TTL, denial message and success literals
    pub fn new(coordinator: LockCoordinator, cleanup: Arc<dyn CleanupDispatcher>) -> Self {
        Self {
            fingerprints: FingerprintGenerator::new(),
            coordinator,
            evaluator: OutcomeEvaluator::default(),
            cleanup,
            default_ttl: Duration::from_millis(DEFAULT_LOCK_TTL_MS),
            denial_message: DEFAULT_DENIAL_MESSAGE.to_string(),
        }
    }

    /// Use a specific fingerprint generator (e.g. with a key namespace)
    #[must_use]
    pub fn with_fingerprints(mut self, fingerprints: FingerprintGenerator) -> Self {
        self.fingerprints = fingerprints;
        self
    }

    /// Use a specific outcome evaluator
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: OutcomeEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Set the TTL used when a call carries no override
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the message returned to denied callers without an override
    #[must_use]
    pub fn with_denial_message<S: Into<String>>(mut self, message: S) -> Self {
        self.denial_message = message.into();
        self
    }

    /// TTL used when a call carries no override
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// The lock coordinator backing this gate
    pub fn coordinator(&self) -> &LockCoordinator {
        &self.coordinator
    }

    /// The fingerprint generator backing this gate
    pub fn fingerprints(&self) -> &FingerprintGenerator {
        &self.fingerprints
    }

    /// Admit a call, or deny it because an identical call holds the lock
    ///
    /// Fails with `Error::InvalidArgument` when the effective TTL is zero.
    ///
    /// Completes one store round trip before returning. On success the
    /// returned session must be passed to [`complete`](Self::complete) once
    /// the guarded operation has finished.
    pub async fn admit(&self, call: &CallDescriptor) -> Result<SessionContext> {
        let key = self.fingerprints.fingerprint(call)?;
        let ttl = self.lock_ttl(call.ttl_override)?;

        match self.coordinator.acquire(&key, ttl).await {
            Acquisition::Acquired(token) => {
                info!(
                    key = %key,
                    target = %call.target_identity,
                    operation = %call.operation_name,
                    "Request admitted"
                );
                Ok(SessionContext::new(key, token, ttl))
            }
            Acquisition::Blocked => {
                debug!(key = %key, operation = %call.operation_name, "Duplicate request denied");
                Err(Error::duplicate_call(
                    call.effective_denial_message(&self.denial_message),
                ))
            }
        }
    }

    /// Report the outcome of an admitted call
    ///
    /// Consumes the session. The release or refresh decided here runs on the
    /// cleanup dispatcher; the returned transition is informational.
    pub fn complete(&self, session: SessionContext, outcome: &CallOutcome) -> Transition {
        let (key, token, ttl) = session.into_parts();
        self.finish(key, Some(token), ttl, outcome)
    }

    /// Report the outcome of a call whose session was lost
    ///
    /// Degraded path for completions that run in a different execution
    /// context than admission. The key is recomputed from the same
    /// descriptor, but the token cannot be recovered: a release is not
    /// possible and the record stays until its TTL expires. A refresh falls
    /// back to set-if-absent.
    pub fn complete_detached(
        &self,
        call: &CallDescriptor,
        outcome: &CallOutcome,
    ) -> Result<Transition> {
        let key = self.fingerprints.fingerprint(call)?;
        let ttl = self.lock_ttl(call.ttl_override)?;
        Ok(self.finish(key, None, ttl, outcome))
    }

    /// Acquire `key` directly, outside call interception
    ///
    /// The key is used verbatim. `ttl_override` applies to this lock only;
    /// a zero TTL is refused.
    pub async fn lock_manually(&self, key: &str, ttl_override: Option<Duration>) -> bool {
        let ttl = match self.lock_ttl(ttl_override) {
            Ok(ttl) => ttl,
            Err(e) => {
                warn!(key = %key, error = %e, "Manual lock refused");
                return false;
            }
        };
        self.coordinator
            .acquire(&InvocationKey::new(key), ttl)
            .await
            .is_acquired()
    }

    /// Best-effort diagnostic read of a lock record
    pub async fn get(&self, key: &str) -> Option<String> {
        self.coordinator.get(key).await
    }

    /// A record that expires on creation would admit every duplicate
    fn lock_ttl(&self, ttl_override: Option<Duration>) -> Result<Duration> {
        let ttl = ttl_override.unwrap_or(self.default_ttl);
        if ttl.is_zero() {
            return Err(Error::invalid_argument("Lock TTL cannot be 0"));
        }
        Ok(ttl)
    }

    fn finish(
        &self,
        key: InvocationKey,
        token: Option<LockToken>,
        ttl: Duration,
        outcome: &CallOutcome,
    ) -> Transition {
        let transition = self.evaluator.evaluate(outcome);
        let has_token = token.is_some();

        match transition.cleanup_task(key.clone(), token, ttl) {
            Some(task) => self.dispatch(task, transition),
            None if transition.releases() && !has_token => {
                warn!(
                    key = %key,
                    transition = %transition,
                    "Lock token unavailable, record left to expire by TTL"
                );
            }
            None => debug!(key = %key, transition = %transition, "No cleanup required"),
        }
        transition
    }

    fn dispatch(&self, task: CleanupTask, transition: Transition) {
        debug!(key = %task.key(), task = task.kind(), transition = %transition, "Dispatching cleanup");
        self.cleanup.dispatch(task);
    }
}

impl fmt::Debug for AdmissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionGate")
            .field("coordinator", &self.coordinator)
            .field("namespace", &self.fingerprints.namespace())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
