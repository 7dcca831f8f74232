//! # Signer Abstraction
//!
//! The signing primitive is a collaborator of the archive writer, not part
//! of it. Any backend that can turn manifest bytes into a detached
//! signature implements [`Signer`]:
//!
//! - [`Ed25519Signer`](crate::Ed25519Signer): in-process Ed25519 key. Its
//!   raw signatures are checked with the matching public key only; pass
//!   viewers will not accept them.
//! - Test fakes returning fixed bytes.
//! - Certificate-chain signers producing PKCS#7 blobs for verifiers that
//!   require them.
//!
//! Implementations must be `Send + Sync` so a writer can be moved to
//! another thread between calls.

use pkpass_core::CanonicalBytes;

use crate::error::SigningError;

/// A detached-signature backend.
pub trait Signer: Send + Sync {
    /// Produce a detached signature over the exact bytes of `data`.
    ///
    /// # Errors
    ///
    /// Returns a `SigningError` if the backend cannot sign. Callers
    /// propagate it unchanged.
    fn sign(&self, data: &CanonicalBytes) -> Result<Vec<u8>, SigningError>;

    /// Human-readable name for this backend (for diagnostics/logging).
    fn signer_name(&self) -> &str;
}

impl<S: Signer + ?Sized> Signer for Box<S> {
    fn sign(&self, data: &CanonicalBytes) -> Result<Vec<u8>, SigningError> {
        (**self).sign(data)
    }

    fn signer_name(&self) -> &str {
        (**self).signer_name()
    }
}
