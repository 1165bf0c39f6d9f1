//! Configuration management
//!
//! Layered configuration with Figment: built-in defaults, then a TOML file,
//! then `IDEMP_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
