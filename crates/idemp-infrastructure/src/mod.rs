//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns and the composition root.
//!
//! ## Module Categories
//!
//! ### Configuration & Wiring
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (defaults, TOML, env) |
//! | [`bootstrap`] | Builds the admission gate from configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Execution
//! | Module | Description |
//! |--------|-------------|
//! | [`cleanup`] | Bounded background queue for release/refresh tasks |
//!
//! ### Observability & Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod bootstrap;
pub mod cleanup;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{AppContext, init_app};
pub use cleanup::CleanupQueue;
pub use error_ext::ErrorContext;
