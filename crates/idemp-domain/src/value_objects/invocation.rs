//! Invocation Identity Value Objects
//!
//! Keys, tokens and the call descriptor handed over by the dispatcher.

use crate::constants::KEY_NAMESPACE_SEPARATOR;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Value Object: Invocation Key
///
/// Identifies one logical call. Generated keys are a fixed-length digest of
/// the call descriptor; manual keys are whatever the caller chose. Either way
/// the key is the name of the lock record in the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationKey(String);

impl InvocationKey {
    /// Wrap an already computed key
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Prefix the key with a namespace (`<namespace>:<key>`)
    ///
    /// An empty namespace leaves the key untouched.
    #[must_use]
    pub fn with_namespace(self, namespace: &str) -> Self {
        if namespace.is_empty() {
            self
        } else {
            Self(format!("{namespace}{KEY_NAMESPACE_SEPARATOR}{}", self.0))
        }
    }

    /// Borrow the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for InvocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InvocationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Value Object: Lock Token
///
/// Fresh random value written as the lock record's value on every
/// acquisition attempt. Release and refresh only touch the record while it
/// still holds this exact token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockToken(String);

impl LockToken {
    /// Generate a new random token (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LockToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LockToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for LockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value Object: Call Descriptor
///
/// Everything the dispatcher supplies about a call before it runs. Arguments
/// are captured as JSON values at the moment they are added, in call order,
/// so a value that cannot be serialized is rejected up front instead of
/// being replaced by something non-deterministic.
///
/// ## Example
///
/// ```rust
/// use idemp_domain::value_objects::CallDescriptor;
/// use std::time::Duration;
///
/// let call = CallDescriptor::new("billing::PaymentService", "charge")
///     .arg("order-42")?
///     .arg(&1999_u64)?
///     .with_ttl(Duration::from_secs(30));
/// assert_eq!(call.args.len(), 2);
/// # Ok::<(), idemp_domain::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    /// Type identity of the call target
    pub target_identity: String,
    /// Name of the guarded operation
    pub operation_name: String,
    /// Ordered argument values
    pub args: Vec<serde_json::Value>,
    /// Lock TTL for this call, replacing the configured default
    pub ttl_override: Option<Duration>,
    /// Message returned instead of the default when the call is denied
    pub denial_message: Option<String>,
}

impl CallDescriptor {
    /// Create a descriptor with no arguments
    pub fn new<T: Into<String>, O: Into<String>>(target_identity: T, operation_name: O) -> Self {
        Self {
            target_identity: target_identity.into(),
            operation_name: operation_name.into(),
            args: Vec::new(),
            ttl_override: None,
            denial_message: None,
        }
    }

    /// Create a descriptor whose target identity is the Rust type name of `T`
    ///
    /// `std::any::type_name` output is not stable across compiler versions,
    /// so processes built with different toolchains may compute different
    /// keys for the same call. Deployments that mix builds should use
    /// [`new`](Self::new) with an explicit identity.
    pub fn for_type<T: ?Sized, O: Into<String>>(operation_name: O) -> Self {
        Self::new(std::any::type_name::<T>(), operation_name)
    }

    /// Append an argument, serializing it immediately
    pub fn arg<A: Serialize + ?Sized>(mut self, value: &A) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(|e| {
            Error::serialization(format!(
                "argument {} of {}::{} is not serializable: {e}",
                self.args.len(),
                self.target_identity,
                self.operation_name
            ))
        })?;
        self.args.push(value);
        Ok(self)
    }

    /// Append an argument that is already a JSON value
    #[must_use]
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.args.push(value);
        self
    }

    /// Override the lock TTL for this call
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_override = Some(ttl);
        self
    }

    /// Override the denial message for this call
    #[must_use]
    pub fn with_denial_message<S: Into<String>>(mut self, message: S) -> Self {
        self.denial_message = Some(message.into());
        self
    }

    /// The caller-supplied denial message, ignoring empty overrides
    pub fn effective_denial_message<'a>(&'a self, default: &'a str) -> &'a str {
        match self.denial_message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => default,
        }
    }
}
