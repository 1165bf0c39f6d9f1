//! Application Layer - idemp
//!
//! Implements the idempotency lock protocol on top of the domain ports.
//!
//! ## Architecture
//!
//! The application layer:
//! - Contains the protocol services (fingerprinting, lock coordination,
//!   outcome evaluation, per-invocation session)
//! - Exposes the admission use case consumed by dispatchers
//! - Has no dependencies on store clients or runtime wiring
//!
//! ## Flow
//!
//! ```text
//! admit(call) ─► FingerprintGenerator ─► LockCoordinator::acquire ─► SessionContext
//!                                                                        │
//!            guarded operation runs (dispatcher)                         │
//!                                                                        ▼
//! complete(session, outcome) ─► OutcomeEvaluator ─► CleanupTask ─► CleanupDispatcher
//! ```
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `idemp-domain`: value objects, errors and port traits
//! - Pure Rust libraries for hashing, serialization and logging

pub mod domain_services;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
