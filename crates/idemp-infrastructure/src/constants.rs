//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Protocol constants are defined in `idemp_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "idemp.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "idemp";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "IDEMP";

/// Separator between nested keys in environment variable names
/// (e.g. `IDEMP_LOCK__DEFAULT_TTL_MS`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a log filter that overrides the configured level
pub const LOG_FILTER_ENV: &str = "IDEMP_LOG";

/// File name prefix used when the log path has no stem
pub const LOG_FILE_PREFIX: &str = "idemp";

// ============================================================================
// CLEANUP QUEUE CONSTANTS
// ============================================================================

/// Default number of cleanup tasks buffered before new ones are dropped
pub const CLEANUP_QUEUE_CAPACITY: usize = 1024;
