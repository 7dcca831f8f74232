//! # pkpass-core — Foundational Types for Pass Archives
//!
//! This crate is the leaf of the workspace. It defines the value types and
//! canonical forms that every other crate relies on when building a signed
//! pass archive.
//!
//! ## Key Design Principles
//!
//! 1. **Hard codecs.** `Color` and `Timestamp` each have exactly one textual
//!    form. Formatting and parsing are symmetric; anything that is not the
//!    canonical form is rejected, never repaired.
//!
//! 2. **`CanonicalBytes` newtype.** Descriptor and manifest bytes that end up
//!    signed or digested are produced only through `CanonicalBytes`
//!    constructors, so two builds of identical input yield identical bytes.
//!
//! 3. **Streaming digests.** `EntryHasher` implements `std::io::Write`, so an
//!    archive entry is hashed in the same pass that copies it into the
//!    container.
//!
//! 4. **One error kind per validation rule.** `ValidationError` has a
//!    distinguishable variant for each descriptor rule.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pkpass-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod color;
pub mod digest;
pub mod error;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use color::Color;
pub use digest::{ContentDigest, DigestAlgorithm, EntryHasher};
pub use error::{CanonicalizationError, CodecError, ValidationError};
pub use temporal::Timestamp;
