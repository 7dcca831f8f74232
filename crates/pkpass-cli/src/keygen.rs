//! # Keygen Subcommand
//!
//! Writes a fresh Ed25519 keypair as hex: `<prefix>.key` holds the 32-byte
//! seed, `<prefix>.pub` the public key.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use pkpass_crypto::Ed25519Signer;

/// Arguments for `pkpass keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Output directory for the keypair files.
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,

    /// Prefix for the key filenames.
    #[arg(long, default_value = "pkpass")]
    pub prefix: String,
}

/// Execute `pkpass keygen`.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    let (key_path, pub_path) = write_keypair(&args.output, &args.prefix)?;
    println!("OK: generated Ed25519 keypair");
    println!("  Private key: {}", key_path.display());
    println!("  Public key:  {}", pub_path.display());
    Ok(0)
}

/// Generate a keypair under `dir` and return the key and public key paths.
pub fn write_keypair(dir: &Path, prefix: &str) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let signer = Ed25519Signer::generate();
    let key_path = dir.join(format!("{prefix}.key"));
    let pub_path = dir.join(format!("{prefix}.pub"));

    std::fs::write(&key_path, signer.export_seed_hex())
        .with_context(|| format!("failed to write private key: {}", key_path.display()))?;
    std::fs::write(&pub_path, signer.public_key().to_hex())
        .with_context(|| format!("failed to write public key: {}", pub_path.display()))?;
    Ok((key_path, pub_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkpass_crypto::Ed25519PublicKey;

    #[test]
    fn keypair_files_match() {
        let dir = tempfile::tempdir().unwrap();
        let (key_path, pub_path) = write_keypair(&dir.path().join("keys"), "issuer").unwrap();
        assert!(key_path.ends_with("issuer.key"));

        let signer = Ed25519Signer::from_key_file(&key_path).unwrap();
        let public = Ed25519PublicKey::from_hex(&std::fs::read_to_string(&pub_path).unwrap()).unwrap();
        assert_eq!(signer.public_key(), public);
    }

    #[test]
    fn keys_are_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let (a, _) = write_keypair(dir.path(), "a").unwrap();
        let (b, _) = write_keypair(dir.path(), "b").unwrap();
        assert_ne!(
            std::fs::read_to_string(a).unwrap(),
            std::fs::read_to_string(b).unwrap()
        );
    }
}
