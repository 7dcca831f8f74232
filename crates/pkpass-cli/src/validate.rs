//! # Validate Subcommand
//!
//! Checks a `pass.json` document and prints the digest of its canonical
//! form, which is what `build` would record in the manifest if the
//! descriptor were written canonically.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pkpass_core::DigestAlgorithm;
use pkpass_pass::{PassDescriptor, PassError};

use crate::config::CliConfig;

/// Arguments for `pkpass validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Descriptor to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Digest to print (sha1 or sha256).
    #[arg(long)]
    pub digest: Option<DigestAlgorithm>,
}

/// Execute `pkpass validate`.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let descriptor = match PassDescriptor::from_json(&bytes) {
        Ok(d) => d,
        Err(e @ PassError::Validation(_)) => {
            println!("FAIL: {}: {e}", args.file.display());
            return Ok(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to parse {}", args.file.display()))
        }
    };

    let algorithm = args.digest.unwrap_or(config.digest);
    match descriptor.canonical_digest(algorithm) {
        Ok(digest) => {
            println!("OK: {} is valid", args.file.display());
            println!("  Serial:  {}", descriptor.serial_number);
            println!("  Style:   {}", descriptor.style.key());
            println!("  Digest:  {digest}");
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {}: {e}", args.file.display());
            Ok(1)
        }
    }
}
