//! # pkpass-crypto — Signing Collaborators
//!
//! The archive writer never signs anything itself. It hands the exact
//! `manifest.json` bytes to a [`Signer`] and stores whatever detached
//! signature comes back. This crate defines that seam and ships one
//! implementation:
//!
//! - **[`Signer`]** — object-safe signing trait, injected into the writer as
//!   `Box<dyn Signer>` so tests can substitute a deterministic fake.
//! - **[`Ed25519Signer`]** — raw 64-byte Ed25519 detached signatures, with
//!   seeds loaded from memory, a hex key file, or an environment variable.
//!
//! Archives signed by [`Ed25519Signer`] verify only against its own public
//! key (see [`verify_detached`]). Wallet apps and other existing pass
//! verifiers expect a PKCS#7 / CMS signature over an x509 certificate and
//! reject them. No such signer ships here; one plugs in behind the same
//! trait.
//!
//! ## Crate Policy
//!
//! - Depends only on `pkpass-core` internally.
//! - Private keys are never serialized or logged.
//! - Signing input is `&CanonicalBytes`, never raw bytes.

pub mod ed25519;
pub mod error;
pub mod signer;

pub use ed25519::{verify_detached, Ed25519PublicKey, Ed25519Signer};
pub use error::SigningError;
pub use signer::Signer;
