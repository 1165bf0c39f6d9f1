//! Background cleanup execution
//!
//! Runs the release/refresh work decided at completion off the caller's
//! path.

pub mod queue;

pub use queue::{CleanupQueue, CleanupStats};
