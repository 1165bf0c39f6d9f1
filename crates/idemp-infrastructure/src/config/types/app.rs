//! Main application configuration

use super::{CleanupConfig, LockConfig, LoggingConfig, StoreConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// ```toml
/// [lock]
/// default_ttl_ms = 1500000
/// namespace = "billing"
/// failure_policy = "fail_closed"
///
/// [store]
/// provider = "redis"
///
/// [store.redis]
/// urls = ["redis://localhost:6379"]
/// topology = "auto"
///
/// [cleanup]
/// queue_capacity = 1024
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lock protocol settings
    pub lock: LockConfig,
    /// Lock store backend
    pub store: StoreConfig,
    /// Background cleanup queue
    pub cleanup: CleanupConfig,
    /// Logging
    pub logging: LoggingConfig,
}
