//! # Build Subcommand
//!
//! Packs a directory into a signed pass archive.
//!
//! Files are visited recursively in name order and offered to the archive
//! writer under their forward-slash relative names; the writer decides
//! which ones to keep. The archive is written to a temporary file next to
//! the output and renamed into place only after it has been sealed.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tempfile::NamedTempFile;

use pkpass_archive::{AddOutcome, PassWriter, WriterOptions};
use pkpass_core::DigestAlgorithm;

use crate::config::{CliConfig, KeySource};

/// Extension given to archives.
pub const ARCHIVE_EXTENSION: &str = "pkpass";

/// Arguments for `pkpass build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Archive to create. `.pkpass` is appended when missing.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Directory holding pass.json and its assets.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Signing key file (hex-encoded 32-byte seed).
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Environment variable holding the hex signing seed.
    #[arg(long)]
    pub key_env: Option<String>,

    /// Manifest digest (sha1 or sha256).
    #[arg(long)]
    pub digest: Option<DigestAlgorithm>,
}

/// Execute `pkpass build`.
pub fn run_build(args: &BuildArgs, config: &CliConfig) -> Result<u8> {
    let output = archive_path(&args.output);
    let signer = KeySource::resolve(args.key.as_deref(), args.key_env.as_deref(), config).load()?;
    let options = WriterOptions {
        digest: args.digest.unwrap_or(config.digest),
        ..WriterOptions::default()
    };

    let files = collect_files(&args.dir)?;
    tracing::debug!(dir = %args.dir.display(), files = files.len(), "collected source files");

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let staging = NamedTempFile::new_in(&parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;

    let mut writer = PassWriter::with_options(staging, Box::new(signer), options);
    let mut added = 0usize;
    for (name, path) in &files {
        let file = File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        match writer
            .add(name, BufReader::new(file))
            .with_context(|| format!("failed to add {name}"))?
        {
            AddOutcome::Added(_) => {
                tracing::info!(entry = %name, "added");
                added += 1;
            }
            AddOutcome::Skipped => {}
        }
    }
    writer.close().context("failed to seal archive")?;

    let staging = writer
        .into_inner()
        .context("archive output was not returned after sealing")?;
    staging
        .persist(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("OK: created {}", output.display());
    println!("  Entries: {added}");
    Ok(0)
}

/// Append the archive extension unless `path` already has it.
pub fn archive_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|e| e == ARCHIVE_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    PathBuf::from(name)
}

/// All regular files under `root`, depth-first in name order, paired with
/// their forward-slash names relative to `root`.
pub fn collect_files(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut out = Vec::new();
    walk(root, root, &mut out)?;
    Ok(out)
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, PathBuf)>) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read directory {}", dir.display()))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat {}", path.display()))?;
        if file_type.is_dir() {
            walk(root, &path, out)?;
        } else if file_type.is_file() {
            let relative = path.strip_prefix(root).with_context(|| {
                format!("{} is outside {}", path.display(), root.display())
            })?;
            out.push((archive_name(relative), path.clone()));
        }
    }
    Ok(())
}

/// Join path components with `/`.
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
