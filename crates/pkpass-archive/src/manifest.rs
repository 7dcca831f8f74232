//! # Manifest
//!
//! The manifest maps every accepted entry name to the lowercase hex digest
//! of its content. Keys are kept in a `BTreeMap`, so the serialized form is
//! sorted by byte order and two archives built from the same entries have
//! byte-identical manifests.
//!
//! The rendered bytes are what gets written as `manifest.json` and what
//! the signer signs.

use std::collections::BTreeMap;

use serde::Serialize;

use pkpass_core::{CanonicalBytes, ContentDigest};

use crate::error::ArchiveError;

/// Entry name to hex digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the digest of an entry, replacing any earlier one.
    pub fn insert(&mut self, name: impl Into<String>, digest: &ContentDigest) {
        self.entries.insert(name.into(), digest.to_hex());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Hex digest recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tab-indented JSON with sorted keys.
    pub fn to_canonical_bytes(&self) -> Result<CanonicalBytes, ArchiveError> {
        Ok(CanonicalBytes::indented(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkpass_core::DigestAlgorithm;
    use proptest::prelude::*;

    fn manifest(entries: &[(&str, &[u8])]) -> Manifest {
        let mut m = Manifest::new();
        for (name, data) in entries {
            m.insert(*name, &DigestAlgorithm::Sha1.digest(data));
        }
        m
    }

    #[test]
    fn rendered_form_is_sorted_and_tab_indented() {
        let m = manifest(&[("pass.json", &b"abc"[..]), ("icon.png", &b""[..])]);
        let bytes = m.to_canonical_bytes().unwrap();
        assert_eq!(
            std::str::from_utf8(bytes.as_bytes()).unwrap(),
            "{\n\t\"icon.png\": \"da39a3ee5e6b4b0d3255bfef95601890afd80709\",\n\t\"pass.json\": \"a9993e364706816aba3e25717850c26c9cd0d89d\"\n}"
        );
    }

    #[test]
    fn later_digest_replaces_earlier() {
        let mut m = manifest(&[("icon.png", &b"one"[..])]);
        m.insert("icon.png", &DigestAlgorithm::Sha1.digest(b"abc"));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("icon.png"), Some("a9993e364706816aba3e25717850c26c9cd0d89d"));
    }

    proptest! {
        #[test]
        fn rendering_ignores_insertion_order(
            entries in proptest::collection::btree_map("[a-z]{1,8}\\.png", proptest::collection::vec(any::<u8>(), 0..32), 1..8)
        ) {
            let forward: Vec<(&str, &[u8])> =
                entries.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect();
            let mut backward = forward.clone();
            backward.reverse();
            prop_assert_eq!(
                manifest(&forward).to_canonical_bytes().unwrap(),
                manifest(&backward).to_canonical_bytes().unwrap()
            );
        }
    }
}
