//! Invocation fingerprinting
//!
//! Turns a [`CallDescriptor`] into the [`InvocationKey`] naming its lock
//! record. Two descriptors with the same target, operation and argument
//! values in the same order always produce the same key, in any process.

use idemp_domain::constants::INVOCATION_KEY_HEX_LEN;
use idemp_domain::error::{Error, Result};
use idemp_domain::value_objects::{CallDescriptor, InvocationKey};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Separates the components of the canonical string so that adjacent
/// components cannot be re-split into a different call with the same text.
const COMPONENT_SEPARATOR: char = '\u{1f}';

/// Deterministic call fingerprinting
///
/// The canonical string is the target identity, the operation name and the
/// canonical JSON of every argument, in call order. Object keys are sorted at
/// every depth so map iteration order never reaches the key. The key is the
/// first 128 bits of the SHA-256 digest of that string, upper-case hex.
#[derive(Debug, Clone, Default)]
pub struct FingerprintGenerator {
    namespace: Option<String>,
}

impl FingerprintGenerator {
    /// Create a generator producing bare digests
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every generated key with `namespace`
    pub fn with_namespace<S: Into<String>>(namespace: S) -> Self {
        let namespace = namespace.into();
        Self {
            namespace: (!namespace.is_empty()).then_some(namespace),
        }
    }

    /// Namespace applied to generated keys, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Compute the invocation key of a call
    pub fn fingerprint(&self, call: &CallDescriptor) -> Result<InvocationKey> {
        let canonical = Self::canonical_string(call)?;
        let digest = Sha256::digest(canonical.as_bytes());
        let key = InvocationKey::new(hex::encode_upper(&digest[..INVOCATION_KEY_HEX_LEN / 2]));

        Ok(match &self.namespace {
            Some(namespace) => key.with_namespace(namespace),
            None => key,
        })
    }

    /// Build the canonical string hashed by [`fingerprint`](Self::fingerprint)
    pub fn canonical_string(call: &CallDescriptor) -> Result<String> {
        let mut out = String::with_capacity(64);
        out.push_str(&call.target_identity);
        out.push(COMPONENT_SEPARATOR);
        out.push_str(&call.operation_name);
        for arg in &call.args {
            out.push(COMPONENT_SEPARATOR);
            write_canonical(arg, &mut out)?;
        }
        Ok(out)
    }
}

fn write_canonical(value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&to_json(key)?);
                out.push(':');
                write_canonical(item, out)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&to_json(scalar)?),
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::serialization(format!("cannot canonicalize argument: {e}")))
}
