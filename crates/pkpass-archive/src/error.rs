//! # Archive Errors
//!
//! Failures from the stream, the container writer and the signer are
//! carried unchanged so callers can tell them apart from rule violations.

use thiserror::Error;

use pkpass_core::CanonicalizationError;
use pkpass_crypto::SigningError;
use pkpass_pass::PassError;

/// Error building or sealing a pass archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive no longer accepts entries.
    #[error("archive is closed")]
    Closed,

    /// `Close` was called before `pass.json` was added.
    #[error("pass.json was never added to the archive")]
    DescriptorMissing,

    /// An entry with this name was already added.
    #[error("entry {0:?} was already added")]
    DuplicateEntry(String),

    /// The descriptor could not be serialized.
    #[error("descriptor: {0}")]
    Descriptor(#[from] PassError),

    /// The signer refused or failed.
    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),

    /// Reading an entry or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip writer failed.
    #[error("container error: {0}")]
    Container(#[from] zip::result::ZipError),

    /// The manifest could not be serialized.
    #[error("manifest canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
