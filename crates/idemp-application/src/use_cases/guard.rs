//! Idempotency Guard
//!
//! Wraps an async operation with admission and completion, for callers that
//! have no dispatcher of their own.

use crate::use_cases::admission_gate::AdmissionGate;
use idemp_domain::error::Result;
use idemp_domain::value_objects::{CallDescriptor, CallOutcome};
use serde::Serialize;
use std::future::Future;
use tracing::warn;

/// Runs operations behind an [`AdmissionGate`]
///
/// ## Example
///
/// ```ignore
/// let guard = IdempotencyGuard::new(gate);
/// let call = CallDescriptor::new("billing::PaymentService", "charge").arg(&order_id)?;
/// let receipt = guard.execute(&call, || service.charge(order_id)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct IdempotencyGuard {
    gate: AdmissionGate,
}

impl IdempotencyGuard {
    /// Create a guard over a gate
    pub fn new(gate: AdmissionGate) -> Self {
        Self { gate }
    }

    /// The gate used by this guard
    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Admit `call`, run `op`, report its outcome and return its result
    ///
    /// A denied call returns `Error::DuplicateCall` without running `op`. An
    /// `Error::DuplicateCall` returned by `op` itself releases nothing.
    pub async fn execute<T, F, Fut>(&self, call: &CallDescriptor, op: F) -> Result<T>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let session = self.gate.admit(call).await?;
        let result = op().await;

        let outcome = match &result {
            Ok(value) => CallOutcome::returned(value).unwrap_or_else(|e| {
                warn!(operation = %call.operation_name, error = %e, "Result not serializable, releasing lock");
                CallOutcome::Returned(String::new())
            }),
            // A denial surfacing from `op` (a nested guard) is a no-op: the
            // lock stays until its TTL expires.
            Err(e) => CallOutcome::raised(e),
        };

        self.gate.complete(session, &outcome);
        result
    }
}
