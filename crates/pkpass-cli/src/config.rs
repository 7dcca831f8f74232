//! # CLI Configuration
//!
//! Optional YAML file supplying defaults for the signing key and digest.
//! Command-line flags take precedence over the file.
//!
//! ```yaml
//! signing_key: keys/pkpass.key
//! signing_key_env: PKPASS_SIGNING_KEY
//! digest: sha1
//! ```
//!
//! A relative `signing_key` is resolved against the config file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use pkpass_core::DigestAlgorithm;
use pkpass_crypto::Ed25519Signer;

/// Environment variable consulted when no key is configured.
pub const DEFAULT_KEY_ENV: &str = "PKPASS_SIGNING_KEY";

/// Settings loaded from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Path to a hex seed file.
    #[serde(default)]
    pub signing_key: Option<PathBuf>,
    /// Environment variable holding a hex seed.
    #[serde(default)]
    pub signing_key_env: Option<String>,
    /// Manifest digest.
    #[serde(default)]
    pub digest: DigestAlgorithm,
}

impl CliConfig {
    /// Load the config file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        if let (Some(key), Some(base)) = (&config.signing_key, path.parent()) {
            if key.is_relative() {
                config.signing_key = Some(base.join(key));
            }
        }
        Ok(config)
    }
}

/// Where the signing key comes from, in order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    File(PathBuf),
    Env(String),
}

impl KeySource {
    /// Pick a key source: `--key`, then `--key-env`, then the config file,
    /// then [`DEFAULT_KEY_ENV`].
    pub fn resolve(key: Option<&Path>, key_env: Option<&str>, config: &CliConfig) -> Self {
        if let Some(path) = key {
            return Self::File(path.to_path_buf());
        }
        if let Some(var) = key_env {
            return Self::Env(var.to_string());
        }
        if let Some(path) = &config.signing_key {
            return Self::File(path.clone());
        }
        let var = config
            .signing_key_env
            .clone()
            .unwrap_or_else(|| DEFAULT_KEY_ENV.to_string());
        Self::Env(var)
    }

    pub fn load(&self) -> Result<Ed25519Signer> {
        match self {
            Self::File(path) => Ed25519Signer::from_key_file(path)
                .with_context(|| format!("failed to load signing key: {}", path.display())),
            Self::Env(var) => Ed25519Signer::from_env(var)
                .with_context(|| format!("failed to load signing key from ${var}")),
        }
    }
}
