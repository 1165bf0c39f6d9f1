//! Cleanup queue configuration types

use crate::constants::CLEANUP_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};

/// Cleanup queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Tasks buffered before new ones are dropped
    pub queue_capacity: usize,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            queue_capacity: CLEANUP_QUEUE_CAPACITY,
        }
    }
}
