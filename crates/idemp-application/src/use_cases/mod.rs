//! Use Cases
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`AdmissionGate`] | admit / complete / manual lock |
//! | [`IdempotencyGuard`] | admit + run + complete around an async operation |

pub mod admission_gate;
pub mod guard;

pub use admission_gate::AdmissionGate;
pub use guard::IdempotencyGuard;
