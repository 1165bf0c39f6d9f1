//! Outcome evaluation
//!
//! Decides, once a guarded operation has finished, whether its lock record
//! is released or kept alive to suppress retries of a call that already
//! succeeded.

use idemp_domain::constants::{DEFAULT_SUCCESS_CODE, DEFAULT_SUCCESS_MARKER};
use idemp_domain::value_objects::{CallOutcome, RaisedError, Transition};

/// Outcome state machine
///
/// | Outcome | Transition |
/// |---------|------------|
/// | Returned, contains marker or code | `SucceededSuppressing` |
/// | Returned, contains neither | `FailedReleasing` |
/// | Raised, any error but the gate's denial | `ExceptedReleasing` |
/// | Raised, the gate's denial | `ExceptedNoOp` |
///
/// Matching is a case-insensitive substring test on the serialized result.
/// Empty marker or code literals never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeEvaluator {
    success_marker: String,
    success_code: String,
}

impl OutcomeEvaluator {
    /// Create an evaluator with the given success literals
    pub fn new<M: AsRef<str>, C: AsRef<str>>(success_marker: M, success_code: C) -> Self {
        Self {
            success_marker: success_marker.as_ref().to_lowercase(),
            success_code: success_code.as_ref().to_lowercase(),
        }
    }

    /// Classify an outcome
    pub fn evaluate(&self, outcome: &CallOutcome) -> Transition {
        match outcome {
            CallOutcome::Returned(serialized) if self.is_success(serialized) => {
                Transition::SucceededSuppressing
            }
            CallOutcome::Returned(_) => Transition::FailedReleasing,
            CallOutcome::Raised(RaisedError::DuplicateCall) => Transition::ExceptedNoOp,
            CallOutcome::Raised(RaisedError::Other(_)) => Transition::ExceptedReleasing,
        }
    }

    /// Whether a serialized result carries the success marker or code
    pub fn is_success(&self, serialized: &str) -> bool {
        let haystack = serialized.to_lowercase();
        [&self.success_marker, &self.success_code]
            .into_iter()
            .any(|needle| !needle.is_empty() && haystack.contains(needle.as_str()))
    }
}

impl Default for OutcomeEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_MARKER, DEFAULT_SUCCESS_CODE)
    }
}
