//! Domain layer constants
//!
//! Protocol defaults. Every value here can be overridden through the
//! infrastructure configuration; these are what an empty config resolves to.

// ============================================================================
// LOCK CONSTANTS
// ============================================================================

/// Default lock time-to-live in milliseconds (25 minutes)
pub const DEFAULT_LOCK_TTL_MS: u64 = 1_500_000;

/// Separator between the key namespace and the digest
pub const KEY_NAMESPACE_SEPARATOR: &str = ":";

/// Length in hex characters of a generated invocation key digest
pub const INVOCATION_KEY_HEX_LEN: usize = 32;

// ============================================================================
// OUTCOME CONSTANTS
// ============================================================================

/// Literal whose presence in a serialized result marks the call as succeeded
pub const DEFAULT_SUCCESS_MARKER: &str = "true";

/// Business success code whose presence marks the call as succeeded
pub const DEFAULT_SUCCESS_CODE: &str = "90001";

/// Message returned to a caller whose request is already being processed
pub const DEFAULT_DENIAL_MESSAGE: &str =
    "Your request has been received and is being processed, please check the result later";
