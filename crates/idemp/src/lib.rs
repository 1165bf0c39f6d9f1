//! # idemp
//!
//! Distributed idempotency gate: rejects a repeated invocation of the same
//! logical call while an earlier one is in flight, or while a successful
//! result is still being suppressed, by coordinating through a shared lock
//! store (Redis standalone or cluster).
//!
//! ## Example
//!
//! ```ignore
//! use idemp::{CallDescriptor, ConfigLoader, init_app};
//!
//! let context = init_app(ConfigLoader::new().load()?).await?;
//! let guard = context.guard();
//!
//! let call = CallDescriptor::new("billing::PaymentService", "charge").arg(&order_id)?;
//! match guard.execute(&call, || payments.charge(order_id)).await {
//!     Err(e) if e.is_duplicate_call() => println!("{e}"),
//!     other => other?,
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Value objects, the error type and port traits
//! - `application` - Fingerprinting, lock coordination, outcome evaluation
//!   and the admission gate
//! - `providers` - Redis and in-memory lock stores
//! - `infrastructure` - Configuration, logging, cleanup queue, bootstrap

/// Domain layer - value objects, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use idemp_domain::*;
}

/// Application layer - protocol services and use cases
pub mod application {
    pub use idemp_application::*;
}

/// Provider layer - lock store implementations
pub mod providers {
    pub use idemp_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use idemp_infrastructure::*;
}

/// Command line interface
pub mod cli;

// Re-export commonly used types at the crate root
pub use domain::*;
pub use idemp_application::{AdmissionGate, FailurePolicy, IdempotencyGuard};
pub use idemp_infrastructure::config::{AppConfig, ConfigLoader};
pub use idemp_infrastructure::{AppContext, init_app};
