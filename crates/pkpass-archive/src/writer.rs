//! # Pass Writer
//!
//! Builds a pass archive in one pass over its entries.
//!
//! ## Lifecycle
//!
//! ```text
//! Open ──close() ok──▶ Sealed
//!   │                    │
//!   └─close() err / add() io err─▶ Disposed ◀─into_inner()─┘
//! ```
//!
//! While `Open`, [`PassWriter::add`] copies each accepted entry into the
//! container and through a digest at the same time. [`PassWriter::close`]
//! writes `manifest.json`, asks the signer for a detached signature over
//! those exact bytes, writes `signature`, and finishes the container. The
//! container is finished exactly once whether or not sealing succeeded.
//! Closing a writer that is no longer open is a no-op.
//!
//! A failed [`PassWriter::add`] leaves a partial entry behind, so the
//! writer finishes the container unsealed and moves to `Disposed`.
//!
//! A writer dropped while still open finishes the container without a
//! manifest or signature. Such output is not a valid pass.

use std::io::{self, Read, Seek, Write};

use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use pkpass_core::{ContentDigest, DigestAlgorithm, EntryHasher};
use pkpass_crypto::Signer;
use pkpass_pass::PassDescriptor;

use crate::entry::{self, EntryKind, DESCRIPTOR_NAME, MANIFEST_NAME, SIGNATURE_NAME};
use crate::error::ArchiveError;
use crate::manifest::Manifest;

/// Tunables for a [`PassWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Digest recorded in the manifest.
    pub digest: DigestAlgorithm,
    /// Per-entry compression.
    pub compression: CompressionMethod,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::Sha1,
            compression: CompressionMethod::Deflated,
        }
    }
}

/// Lifecycle state of a [`PassWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Accepting entries.
    Open,
    /// Manifest and signature written, container finished.
    Sealed,
    /// Finished without a valid seal, or output handed back.
    Disposed,
}

/// Result of a successful [`PassWriter::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The entry was written and its digest recorded.
    Added(ContentDigest),
    /// The entry's extension is not accepted; nothing was written.
    Skipped,
}

/// Streaming builder for a signed pass archive.
pub struct PassWriter<W: Write + Seek> {
    zip: Option<ZipWriter<W>>,
    output: Option<W>,
    signer: Box<dyn Signer>,
    manifest: Manifest,
    has_descriptor: bool,
    state: WriterState,
    options: WriterOptions,
}

impl<W: Write + Seek> PassWriter<W> {
    /// Start an archive on `output` with default options.
    pub fn new(output: W, signer: Box<dyn Signer>) -> Self {
        Self::with_options(output, signer, WriterOptions::default())
    }

    pub fn with_options(output: W, signer: Box<dyn Signer>, options: WriterOptions) -> Self {
        debug!(
            signer = signer.signer_name(),
            digest = %options.digest,
            "opening pass archive"
        );
        Self {
            zip: Some(ZipWriter::new(output)),
            output: None,
            signer,
            manifest: Manifest::new(),
            has_descriptor: false,
            state: WriterState::Open,
            options,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Digests recorded so far.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn has_descriptor(&self) -> bool {
        self.has_descriptor
    }

    fn entry_options(&self) -> SimpleFileOptions {
        // Fixed timestamps keep identical inputs byte-identical.
        SimpleFileOptions::default()
            .compression_method(self.options.compression)
            .last_modified_time(zip::DateTime::default())
    }

    /// Add an entry read from `content`.
    ///
    /// Backslashes in `name` become forward slashes. Entries whose extension
    /// is not accepted are skipped without error (see [`crate::entry`]).
    ///
    /// # Errors
    ///
    /// - `Closed` once the writer has left the `Open` state.
    /// - `DuplicateEntry` if the name was already added; nothing is written.
    /// - `Io` or `Container` if reading `content` or writing the entry fails.
    ///   The partial entry has no digest, so the writer is finished unsealed
    ///   and moves to `Disposed`.
    pub fn add<R: Read>(&mut self, name: &str, mut content: R) -> Result<AddOutcome, ArchiveError> {
        if self.state != WriterState::Open {
            return Err(ArchiveError::Closed);
        }
        let options = self.entry_options();
        let zip = self.zip.as_mut().ok_or(ArchiveError::Closed)?;

        let name = entry::normalize_name(name);
        let Some(kind) = entry::classify(&name) else {
            debug!(entry = %name, "skipping entry with unsupported extension");
            return Ok(AddOutcome::Skipped);
        };
        if self.manifest.contains(&name) {
            return Err(ArchiveError::DuplicateEntry(name));
        }

        let (digest, size) =
            match Self::write_entry(zip, &name, options, self.options.digest, &mut content) {
                Ok(written) => written,
                Err(e) => {
                    // A partial entry has no digest; the archive can no longer be sealed.
                    warn!(entry = %name, error = %e, "entry write failed; disposing archive");
                    self.dispose();
                    return Err(e);
                }
            };

        self.manifest.insert(name.as_str(), &digest);
        if kind == EntryKind::Descriptor {
            self.has_descriptor = true;
        }
        debug!(entry = %name, size, digest = %digest.to_hex(), "added entry");
        Ok(AddOutcome::Added(digest))
    }

    fn write_entry<R: Read>(
        zip: &mut ZipWriter<W>,
        name: &str,
        options: SimpleFileOptions,
        algorithm: DigestAlgorithm,
        content: &mut R,
    ) -> Result<(ContentDigest, u64), ArchiveError> {
        zip.start_file(name, options)?;
        let mut tee = HashingWriter {
            inner: zip,
            hasher: EntryHasher::new(algorithm),
        };
        let size = io::copy(content, &mut tee)?;
        Ok((tee.hasher.finalize(), size))
    }

    /// Finish the container unsealed and stop accepting entries.
    fn dispose(&mut self) {
        self.state = WriterState::Disposed;
        if let Some(zip) = self.zip.take() {
            self.output = zip.finish().ok();
        }
    }

    /// Validate `descriptor` and add it as `pass.json`.
    ///
    /// # Errors
    ///
    /// `Descriptor` if validation fails, otherwise as for [`add`](Self::add).
    pub fn add_descriptor(&mut self, descriptor: &PassDescriptor) -> Result<ContentDigest, ArchiveError> {
        if self.state != WriterState::Open {
            return Err(ArchiveError::Closed);
        }
        let bytes = descriptor.to_canonical_bytes()?;
        match self.add(DESCRIPTOR_NAME, bytes.as_bytes())? {
            AddOutcome::Added(digest) => Ok(digest),
            AddOutcome::Skipped => Err(ArchiveError::DescriptorMissing),
        }
    }

    /// Seal and finish the archive.
    ///
    /// On success the state becomes `Sealed`; on failure it becomes
    /// `Disposed`. In both cases the container has been finished.
    ///
    /// # Errors
    ///
    /// - `DescriptorMissing` if `pass.json` was never added. No manifest or
    ///   signature is written.
    /// - `Signing` with the signer's error. The manifest entry stays.
    /// - `Io`, `Container` or `Canonicalization` from the respective step.
    pub fn close(&mut self) -> Result<(), ArchiveError> {
        if self.state != WriterState::Open {
            return Ok(());
        }
        let Some(mut zip) = self.zip.take() else {
            self.state = WriterState::Disposed;
            return Ok(());
        };

        let sealed = self.seal(&mut zip);
        let finished = zip.finish();

        match (sealed, finished) {
            (Ok(()), Ok(output)) => {
                self.output = Some(output);
                self.state = WriterState::Sealed;
                info!(
                    entries = self.manifest.len(),
                    signer = self.signer.signer_name(),
                    "sealed pass archive"
                );
                Ok(())
            }
            (Ok(()), Err(e)) => {
                self.state = WriterState::Disposed;
                Err(e.into())
            }
            (Err(e), finished) => {
                // The sealing error wins over a finish error.
                self.output = finished.ok();
                self.state = WriterState::Disposed;
                Err(e)
            }
        }
    }

    fn seal(&self, zip: &mut ZipWriter<W>) -> Result<(), ArchiveError> {
        if !self.has_descriptor {
            return Err(ArchiveError::DescriptorMissing);
        }
        let manifest = self.manifest.to_canonical_bytes()?;
        zip.start_file(MANIFEST_NAME, self.entry_options())?;
        zip.write_all(manifest.as_bytes())?;

        let signature = self.signer.sign(&manifest)?;
        zip.start_file(SIGNATURE_NAME, self.entry_options())?;
        zip.write_all(&signature)?;
        Ok(())
    }

    /// Hand back the finished output stream.
    ///
    /// Returns `None` if the writer is still open or the container could not
    /// be finished.
    pub fn into_inner(mut self) -> Option<W> {
        if self.state == WriterState::Open {
            return None;
        }
        self.state = WriterState::Disposed;
        self.output.take()
    }
}

impl<W: Write + Seek> Drop for PassWriter<W> {
    fn drop(&mut self) {
        if self.state == WriterState::Open {
            warn!(
                entries = self.manifest.len(),
                "pass archive dropped without close; output has no manifest or signature"
            );
        }
    }
}

impl<W: Write + Seek> std::fmt::Debug for PassWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassWriter")
            .field("state", &self.state)
            .field("signer", &self.signer.signer_name())
            .field("entries", &self.manifest.len())
            .field("has_descriptor", &self.has_descriptor)
            .field("options", &self.options)
            .finish()
    }
}

/// Writes through to the container and feeds the same bytes to a hasher.
struct HashingWriter<'a, W: Write> {
    inner: &'a mut W,
    hasher: EntryHasher,
}

impl<W: Write> Write for HashingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
