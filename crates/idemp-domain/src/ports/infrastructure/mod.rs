//! Infrastructure Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`CleanupDispatcher`] | Background execution of release/refresh work |

/// Cleanup dispatcher port
pub mod cleanup;

pub use cleanup::CleanupDispatcher;
