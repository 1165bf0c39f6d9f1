//! Lock protocol configuration types

use idemp_application::FailurePolicy;
use idemp_domain::constants::{
    DEFAULT_DENIAL_MESSAGE, DEFAULT_LOCK_TTL_MS, DEFAULT_SUCCESS_CODE, DEFAULT_SUCCESS_MARKER,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lock protocol configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Lock lifetime when a call carries no override, in milliseconds
    pub default_ttl_ms: u64,

    /// Literal whose presence in a serialized result marks success
    pub success_marker: String,

    /// Alternative success literal (a business status code)
    pub success_code: String,

    /// Message returned to denied callers
    pub denial_message: String,

    /// Prefix for generated keys; unset means bare digests
    pub namespace: Option<String>,

    /// Behavior when the store is unreachable during acquisition
    pub failure_policy: FailurePolicy,
}

impl LockConfig {
    /// Default TTL as a `Duration`
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: DEFAULT_LOCK_TTL_MS,
            success_marker: DEFAULT_SUCCESS_MARKER.to_string(),
            success_code: DEFAULT_SUCCESS_CODE.to_string(),
            denial_message: DEFAULT_DENIAL_MESSAGE.to_string(),
            namespace: None,
            failure_policy: FailurePolicy::default(),
        }
    }
}
