//! # Ed25519 Detached Signatures
//!
//! Provides an Ed25519 implementation of [`Signer`](crate::Signer) and the
//! matching verification helper.
//!
//! ## Invariants
//!
//! - Signing input MUST be `&CanonicalBytes`.
//! - Private keys are never serialized or logged. `Ed25519Signer` does not
//!   implement `Serialize`, its `Debug` output hides the key, and key
//!   material is zeroized on drop.
//! - Public keys serialize as lowercase hex strings.
//!
//! ## Key Files
//!
//! A key file holds the 32-byte seed as 64 hex characters; surrounding
//! whitespace is ignored. The same encoding is used for the
//! `PKPASS_SIGNING_KEY` style environment variables.

use std::path::Path;

use ed25519_dalek::{Signer as _, Verifier as _};
use pkpass_core::CanonicalBytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SigningError;
use crate::signer::Signer;

/// Length of an Ed25519 detached signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// An Ed25519 public key (32 bytes) for signature verification.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

/// An in-process Ed25519 signing key.
pub struct Ed25519Signer {
    signing_key: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey impls
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// Return the raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the public key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Parse a public key from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, SigningError> {
        let arr = decode_32(hex)?;
        Ok(Self(arr))
    }

    /// Convert to an `ed25519_dalek::VerifyingKey`.
    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, SigningError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| SigningError::InvalidKey(format!("invalid public key: {e}")))
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", bytes_to_hex(&self.0[..4]))
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signer impls
// ---------------------------------------------------------------------------

impl Ed25519Signer {
    /// Generate a new random key using the OS CSPRNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Create a signer from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Create a signer from a 64-character hex seed.
    pub fn from_seed_hex(hex: &str) -> Result<Self, SigningError> {
        let seed = decode_32(hex)?;
        Ok(Self::from_seed(&seed))
    }

    /// Load a signer from a key file containing a hex seed.
    pub fn from_key_file(path: &Path) -> Result<Self, SigningError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_seed_hex(&contents)
    }

    /// Load a signer from the named environment variable (hex seed).
    pub fn from_env(var_name: &str) -> Result<Self, SigningError> {
        let hex = std::env::var(var_name)
            .map_err(|_| SigningError::MissingEnv(var_name.to_string()))?;
        Self::from_seed_hex(&hex)
    }

    /// The public half of this key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Export the seed as hex, for writing a new key file.
    pub fn export_seed_hex(&self) -> String {
        bytes_to_hex(&self.signing_key.to_bytes())
    }
}

impl Signer for Ed25519Signer {
    fn sign(&self, data: &CanonicalBytes) -> Result<Vec<u8>, SigningError> {
        let sig = self.signing_key.sign(data.as_bytes());
        Ok(sig.to_bytes().to_vec())
    }

    fn signer_name(&self) -> &str {
        "Ed25519Signer"
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signer(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify a detached Ed25519 signature over canonical bytes.
///
/// Returns `Ok(())` if valid, `Err(SigningError::VerificationFailed)`
/// otherwise.
pub fn verify_detached(
    data: &CanonicalBytes,
    signature: &[u8],
    public_key: &Ed25519PublicKey,
) -> Result<(), SigningError> {
    let bytes: [u8; SIGNATURE_LEN] = signature.try_into().map_err(|_| {
        SigningError::VerificationFailed(format!(
            "expected {SIGNATURE_LEN} signature bytes, got {}",
            signature.len()
        ))
    })?;
    let sig = ed25519_dalek::Signature::from_bytes(&bytes);
    public_key
        .to_verifying_key()?
        .verify(data.as_bytes(), &sig)
        .map_err(|e| SigningError::VerificationFailed(e.to_string()))
}

// ---------------------------------------------------------------------------
// Hex utilities
// ---------------------------------------------------------------------------

fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, SigningError> {
    if hex.len() % 2 != 0 {
        return Err(SigningError::HexDecode(
            "hex string must have even length".to_string(),
        ));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| SigningError::HexDecode(format!("invalid hex at position {i}")))
        })
        .collect()
}

/// Decode exactly 32 bytes from (trimmed) hex.
fn decode_32(hex: &str) -> Result<[u8; 32], SigningError> {
    let hex = hex.trim();
    if hex.len() != 64 {
        return Err(SigningError::InvalidKey(format!(
            "key hex must be 64 chars, got {}",
            hex.len()
        )));
    }
    let bytes = hex_to_bytes(hex)?;
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_bytes(body: &str) -> CanonicalBytes {
        CanonicalBytes::indented(&serde_json::json!({ "pass.json": body })).unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = Ed25519Signer::generate();
        let data = manifest_bytes("aa");
        let sig = signer.sign(&data).unwrap();
        assert_eq!(sig.len(), SIGNATURE_LEN);
        verify_detached(&data, &sig, &signer.public_key()).expect("valid signature");
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let a = Ed25519Signer::generate();
        let b = Ed25519Signer::generate();
        let data = manifest_bytes("aa");
        let sig = a.sign(&data).unwrap();
        assert!(verify_detached(&data, &sig, &b.public_key()).is_err());
    }

    #[test]
    fn test_verify_tampered_manifest_fails() {
        let signer = Ed25519Signer::generate();
        let sig = signer.sign(&manifest_bytes("aa")).unwrap();
        assert!(verify_detached(&manifest_bytes("ab"), &sig, &signer.public_key()).is_err());
    }

    #[test]
    fn test_verify_truncated_signature_fails() {
        let signer = Ed25519Signer::generate();
        let data = manifest_bytes("aa");
        let sig = signer.sign(&data).unwrap();
        let err = verify_detached(&data, &sig[..10], &signer.public_key()).unwrap_err();
        assert!(matches!(err, SigningError::VerificationFailed(_)));
    }

    #[test]
    fn test_deterministic_from_seed() {
        let seed = [42u8; 32];
        let a = Ed25519Signer::from_seed(&seed);
        let b = Ed25519Signer::from_seed(&seed);
        assert_eq!(a.public_key(), b.public_key());
        let data = manifest_bytes("aa");
        assert_eq!(a.sign(&data).unwrap(), b.sign(&data).unwrap());
    }

    #[test]
    fn test_seed_hex_roundtrip() {
        let signer = Ed25519Signer::generate();
        let hex = signer.export_seed_hex();
        assert_eq!(hex.len(), 64);
        let restored = Ed25519Signer::from_seed_hex(&format!("  {hex}\n")).unwrap();
        assert_eq!(restored.public_key(), signer.public_key());
    }

    #[test]
    fn test_from_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signer.key");
        std::fs::write(&path, "07".repeat(32)).unwrap();
        let signer = Ed25519Signer::from_key_file(&path).unwrap();
        assert_eq!(
            signer.public_key(),
            Ed25519Signer::from_seed(&[7u8; 32]).public_key()
        );
    }

    #[test]
    fn test_from_key_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Ed25519Signer::from_key_file(&dir.path().join("absent.key")).unwrap_err();
        assert!(matches!(err, SigningError::Io(_)));
    }

    #[test]
    fn test_from_env() {
        let var = "PKPASS_TEST_SIGNING_KEY_FROM_ENV";
        std::env::set_var(var, "ab".repeat(32));
        let signer = Ed25519Signer::from_env(var).unwrap();
        assert_eq!(
            signer.public_key(),
            Ed25519Signer::from_seed(&[0xab; 32]).public_key()
        );
        std::env::remove_var(var);
    }

    #[test]
    fn test_from_env_missing() {
        let err = Ed25519Signer::from_env("PKPASS_TEST_KEY_THAT_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, SigningError::MissingEnv(_)));
    }

    #[test]
    fn test_invalid_seed_hex() {
        assert!(Ed25519Signer::from_seed_hex("not-hex").is_err());
        assert!(Ed25519Signer::from_seed_hex("aabb").is_err());
        assert!(Ed25519Signer::from_seed_hex(&"zz".repeat(32)).is_err());
        // Multi-byte characters must not cause a slicing panic.
        assert!(Ed25519Signer::from_seed_hex(&"\u{e9}".repeat(32)).is_err());
    }

    #[test]
    fn test_public_key_serde_roundtrip() {
        let pk = Ed25519Signer::generate().public_key();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json.len(), 64 + 2);
        let back: Ed25519PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn test_debug_does_not_leak_private_key() {
        let signer = Ed25519Signer::generate();
        let debug = format!("{signer:?}");
        assert_eq!(debug, "Ed25519Signer(<private>)");
        assert!(!debug.contains(&signer.export_seed_hex()));
    }

    #[test]
    fn test_debug_public_key_shows_prefix() {
        let pk = Ed25519Signer::generate().public_key();
        let debug = format!("{pk:?}");
        assert!(debug.starts_with("Ed25519PublicKey("));
        assert!(debug.ends_with("...)"));
    }
}
