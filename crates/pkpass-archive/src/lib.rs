//! # pkpass-archive — Signed Pass Archives
//!
//! Streams a descriptor and its assets into a zip container, then seals it
//! with a manifest of content digests and a detached signature over that
//! manifest.
//!
//! ## Example
//!
//! ```ignore
//! let mut writer = PassWriter::new(file, Box::new(Ed25519Signer::from_key_file(&key)?));
//! writer.add_descriptor(&descriptor)?;
//! writer.add("icon.png", File::open("icon.png")?)?;
//! writer.add("en.lproj/pass.strings", File::open("en.lproj/pass.strings")?)?;
//! writer.close()?;
//! ```
//!
//! ## Container Layout
//!
//! Entries appear in the order they were added, followed by
//! `manifest.json` and `signature`. Nothing is re-read on close.

pub mod entry;
pub mod error;
pub mod manifest;
pub mod writer;

pub use entry::{DESCRIPTOR_NAME, MANIFEST_NAME, SIGNATURE_NAME};
pub use error::ArchiveError;
pub use manifest::Manifest;
pub use writer::{AddOutcome, PassWriter, WriterOptions, WriterState};
