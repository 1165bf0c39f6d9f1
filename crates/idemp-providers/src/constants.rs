//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in idemp-domain) and infrastructure constants.

// ============================================================================
// REDIS LOCK STORE CONSTANTS
// ============================================================================

/// Default Redis URL
pub const REDIS_DEFAULT_URL: &str = "redis://localhost:6379";

/// Line of `INFO cluster` reported by nodes running in cluster mode
pub const REDIS_CLUSTER_ENABLED_LINE: &str = "cluster_enabled:1";

/// Delete the record only while it still holds the caller's token
pub const REDIS_COMPARE_AND_DELETE_SCRIPT: &str = r#"
if redis.call("get", KEYS[1]) == ARGV[1] then
    return redis.call("del", KEYS[1])
else
    return 0
end
"#;

/// Reset the record's expiry only while it still holds the caller's token
pub const REDIS_COMPARE_AND_EXPIRE_SCRIPT: &str = r#"
if redis.call("get", KEYS[1]) == ARGV[1] then
    return redis.call("pexpire", KEYS[1], ARGV[2])
else
    return 0
end
"#;
