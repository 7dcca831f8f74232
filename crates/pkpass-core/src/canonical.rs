//! # Canonical Serialization
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that are digested or signed when sealing a pass archive.
//!
//! ## Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. It can only be
//! built through [`CanonicalBytes::new()`] or [`CanonicalBytes::indented()`],
//! both of which order object keys lexicographically. Serializing the same
//! value twice always yields the same bytes, which keeps manifest signatures
//! reproducible.
//!
//! ## Forms
//!
//! - **Compact** (`new`): RFC 8785 (JSON Canonicalization Scheme) output via
//!   `serde_jcs`. Used for the pass descriptor.
//! - **Indented** (`indented`): sorted keys, one tab per nesting level,
//!   `": "` between key and value. Used for `manifest.json`, whose exact
//!   bytes are what the signer covers.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced by deterministic, key-sorted JSON serialization.
///
/// # Invariants
///
/// - Object keys appear in lexicographic (byte) order at every depth.
/// - Array element order is preserved.
/// - Output is valid UTF-8 JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Serialize a value in compact JCS form.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Serialize a value as tab-indented JSON with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON.
    pub fn indented(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = sort_keys(serde_json::to_value(obj)?);
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut ser)?;
        Ok(Self(out))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the wrapper and return the bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Rebuild every object with its keys inserted in sorted order.
///
/// `serde_json::Map` is already sorted unless `preserve_order` is enabled
/// somewhere in the dependency graph; rebuilding keeps the output stable
/// either way.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
