//! # pkpass CLI entry point
//!
//! Parses command-line arguments, loads the optional config file and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pkpass_cli::build::{run_build, BuildArgs};
use pkpass_cli::config::CliConfig;
use pkpass_cli::keygen::{run_keygen, KeygenArgs};
use pkpass_cli::validate::{run_validate, ValidateArgs};

/// Build signed pass archives.
#[derive(Parser, Debug)]
#[command(name = "pkpass", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack and sign a directory into a pass archive.
    Build(BuildArgs),

    /// Check a pass.json descriptor and print its canonical digest.
    Validate(ValidateArgs),

    /// Generate an Ed25519 signing keypair.
    Keygen(KeygenArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Build(args) => run_build(args, &config),
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Keygen(args) => run_keygen(args),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkpass_core::DigestAlgorithm;

    #[test]
    fn cli_parse_build_defaults() {
        let cli = Cli::try_parse_from(["pkpass", "build", "coffee"]).unwrap();
        assert_eq!(cli.verbose, 0);
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.output, PathBuf::from("coffee"));
        assert_eq!(args.dir, PathBuf::from("."));
        assert!(args.key.is_none());
        assert!(args.digest.is_none());
    }

    #[test]
    fn cli_parse_build_with_options() {
        let cli = Cli::try_parse_from([
            "pkpass",
            "-vv",
            "build",
            "--key",
            "keys/a.key",
            "--digest",
            "sha256",
            "out.pkpass",
            "src",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.key, Some(PathBuf::from("keys/a.key")));
        assert_eq!(args.digest, Some(DigestAlgorithm::Sha256));
        assert_eq!(args.dir, PathBuf::from("src"));
    }

    #[test]
    fn cli_parse_unknown_digest_rejected() {
        assert!(Cli::try_parse_from(["pkpass", "build", "--digest", "md5", "out"]).is_err());
    }

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from(["pkpass", "validate", "pass.json"]).unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.file, PathBuf::from("pass.json"));
    }

    #[test]
    fn cli_parse_keygen() {
        let cli = Cli::try_parse_from(["pkpass", "keygen", "-o", "keys", "--prefix", "issuer"]).unwrap();
        let Commands::Keygen(args) = cli.command else {
            panic!("expected keygen");
        };
        assert_eq!(args.output, PathBuf::from("keys"));
        assert_eq!(args.prefix, "issuer");
    }

    #[test]
    fn cli_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["pkpass", "validate", "pass.json", "--config", "pkpass.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("pkpass.yaml")));
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["pkpass"]).is_err());
    }
}
