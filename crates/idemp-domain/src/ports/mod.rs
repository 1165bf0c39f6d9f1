//! Domain Port Interfaces
//!
//! Defines all boundary contracts between domain and external layers.
//!
//! ## Architecture
//!
//! Ports define the contracts that external layers must implement.
//! This follows the Dependency Inversion Principle:
//! - High-level modules (domain, application) define interfaces
//! - Low-level modules (providers, infrastructure) implement them
//!
//! ## Organization
//!
//! - **infrastructure/** - Background cleanup execution
//! - **providers/** - The shared lock store

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

pub use infrastructure::CleanupDispatcher;
pub use providers::LockStore;
