//! # pkpass-cli — Pass Archive Tool
//!
//! Provides the `pkpass` command-line interface.
//!
//! ## Subcommands
//!
//! - `pkpass build <output> [<dir>]` — Pack and sign a directory.
//! - `pkpass validate <pass.json>` — Check a descriptor.
//! - `pkpass keygen` — Generate an Ed25519 signing key.
//!
//! ```bash
//! pkpass keygen --output keys
//! pkpass validate coffee/pass.json
//! pkpass build --key keys/pkpass.key dist/coffee coffee
//! ```

pub mod build;
pub mod config;
pub mod keygen;
pub mod validate;
