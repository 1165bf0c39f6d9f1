//! Protocol Services
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`FingerprintGenerator`] | Call descriptor to deterministic invocation key |
//! | [`LockCoordinator`] | Atomic acquire / release / refresh / read |
//! | [`SessionContext`] | Key and token carried from admission to completion |
//! | [`OutcomeEvaluator`] | Outcome to release-or-suppress transition |

pub mod coordinator;
pub mod fingerprint;
pub mod outcome;
pub mod session;

pub use coordinator::{Acquisition, FailurePolicy, LockCoordinator};
pub use fingerprint::FingerprintGenerator;
pub use outcome::OutcomeEvaluator;
pub use session::SessionContext;
