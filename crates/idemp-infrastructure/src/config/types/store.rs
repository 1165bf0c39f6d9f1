//! Lock store configuration types

use idemp_providers::constants::REDIS_DEFAULT_URL;
use idemp_providers::lock_store::RedisTopology;
use serde::{Deserialize, Serialize};

/// Lock store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreProvider {
    /// Shared Redis deployment
    #[default]
    Redis,
    /// Process-local map; locks do not span processes
    Memory,
}

/// Redis connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisStoreConfig {
    /// Node URLs; one for standalone, one or more seeds for a cluster
    pub urls: Vec<String>,

    /// Deployment kind
    pub topology: RedisTopology,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            urls: vec![REDIS_DEFAULT_URL.to_string()],
            topology: RedisTopology::Auto,
        }
    }
}

/// Lock store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend used for lock records
    pub provider: StoreProvider,

    /// Redis settings, used when `provider` is `redis`
    pub redis: RedisStoreConfig,
}
