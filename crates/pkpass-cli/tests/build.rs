//! `pkpass build` and `pkpass validate` against a directory on disk.

use std::fs;
use std::io::Read;
use std::path::Path;

use pkpass_cli::build::{run_build, BuildArgs};
use pkpass_cli::config::CliConfig;
use pkpass_cli::keygen::write_keypair;
use pkpass_cli::validate::{run_validate, ValidateArgs};
use pkpass_core::{CanonicalBytes, DigestAlgorithm};
use pkpass_crypto::{verify_detached, Ed25519PublicKey};

const PASS_JSON: &str = r#"{
    "formatVersion": 1,
    "passTypeIdentifier": "pass.com.example.coffee",
    "serialNumber": "C-9001",
    "teamIdentifier": "A1B2C3D4E5",
    "organizationName": "Example Coffee",
    "description": "Coffee card",
    "storeCard": {
        "primaryFields": [{"key": "balance", "label": "BALANCE", "value": 25, "currencyCode": "USD"}]
    }
}"#;

fn source_dir(root: &Path) {
    fs::create_dir_all(root.join("en.lproj")).unwrap();
    fs::write(root.join("pass.json"), PASS_JSON).unwrap();
    fs::write(root.join("icon.png"), b"icon bytes").unwrap();
    fs::write(root.join("en.lproj/pass.strings"), b"\"A\" = \"B\";").unwrap();
    fs::write(root.join("notes.txt"), b"not packed").unwrap();
    fs::write(root.join("draft.json"), b"{}").unwrap();
}

fn build_args(output: &Path, dir: &Path, key: &Path) -> BuildArgs {
    BuildArgs {
        output: output.to_path_buf(),
        dir: dir.to_path_buf(),
        key: Some(key.to_path_buf()),
        key_env: None,
        digest: None,
    }
}

fn read_entry(archive: &mut zip::ZipArchive<fs::File>, name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    archive.by_name(name).unwrap().read_to_end(&mut out).unwrap();
    out
}

#[test]
fn build_packs_and_signs_directory() {
    let work = tempfile::tempdir().unwrap();
    let src = work.path().join("coffee");
    source_dir(&src);
    let (key, public) = write_keypair(&work.path().join("keys"), "issuer").unwrap();

    let code = run_build(
        &build_args(&work.path().join("dist-coffee"), &src, &key),
        &CliConfig::default(),
    )
    .unwrap();
    assert_eq!(code, 0);

    let output = work.path().join("dist-coffee.pkpass");
    assert!(output.exists());

    let mut archive = zip::ZipArchive::new(fs::File::open(&output).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        [
            "en.lproj/pass.strings",
            "icon.png",
            "manifest.json",
            "pass.json",
            "signature"
        ]
    );

    let manifest_bytes = read_entry(&mut archive, "manifest.json");
    let manifest: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(&manifest_bytes).unwrap();
    assert_eq!(
        manifest["pass.json"],
        DigestAlgorithm::Sha1.digest(PASS_JSON.as_bytes()).to_hex()
    );

    // Re-render the parsed manifest to get canonical bytes to verify against.
    let canonical = CanonicalBytes::indented(&manifest).unwrap();
    assert_eq!(canonical.as_bytes(), manifest_bytes.as_slice());
    let signature = read_entry(&mut archive, "signature");
    let public = Ed25519PublicKey::from_hex(&fs::read_to_string(public).unwrap()).unwrap();
    verify_detached(&canonical, &signature, &public).unwrap();
}

#[test]
fn build_without_descriptor_leaves_no_output() {
    let work = tempfile::tempdir().unwrap();
    let src = work.path().join("empty");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("icon.png"), b"icon").unwrap();
    let (key, _) = write_keypair(work.path(), "issuer").unwrap();

    let output = work.path().join("out.pkpass");
    let err = run_build(&build_args(&output, &src, &key), &CliConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("pass.json"));
    assert!(!output.exists());

    let leftovers: Vec<_> = fs::read_dir(work.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|n| n.to_string_lossy().starts_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn build_with_missing_key_fails() {
    let work = tempfile::tempdir().unwrap();
    let src = work.path().join("coffee");
    source_dir(&src);
    let err = run_build(
        &build_args(&work.path().join("out"), &src, &work.path().join("absent.key")),
        &CliConfig::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("failed to load signing key"));
}

#[test]
fn build_honours_configured_digest() {
    let work = tempfile::tempdir().unwrap();
    let src = work.path().join("coffee");
    source_dir(&src);
    let (key, _) = write_keypair(work.path(), "issuer").unwrap();
    let config = CliConfig {
        digest: DigestAlgorithm::Sha256,
        ..CliConfig::default()
    };

    run_build(&build_args(&work.path().join("out"), &src, &key), &config).unwrap();

    let mut archive =
        zip::ZipArchive::new(fs::File::open(work.path().join("out.pkpass")).unwrap()).unwrap();
    let manifest: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(&read_entry(&mut archive, "manifest.json")).unwrap();
    assert_eq!(manifest["icon.png"].as_str().unwrap().len(), 64);
}

#[test]
fn validate_reports_valid_and_invalid() {
    let work = tempfile::tempdir().unwrap();
    let good = work.path().join("pass.json");
    fs::write(&good, PASS_JSON).unwrap();
    let args = ValidateArgs {
        file: good,
        digest: None,
    };
    assert_eq!(run_validate(&args, &CliConfig::default()).unwrap(), 0);

    let bad = work.path().join("bad.json");
    fs::write(&bad, PASS_JSON.replace("Example Coffee", "")).unwrap();
    let args = ValidateArgs {
        file: bad,
        digest: None,
    };
    assert_eq!(run_validate(&args, &CliConfig::default()).unwrap(), 1);
}

#[test]
fn validate_fails_unknown_barcode_format() {
    let work = tempfile::tempdir().unwrap();
    let path = work.path().join("pass.json");
    let mut doc: serde_json::Value = serde_json::from_str(PASS_JSON).unwrap();
    doc["barcode"] = serde_json::json!({"format": "PKBarcodeFormatCode128", "message": "C-9001"});
    fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();
    let args = ValidateArgs {
        file: path,
        digest: None,
    };
    assert_eq!(run_validate(&args, &CliConfig::default()).unwrap(), 1);
}

#[test]
fn validate_rejects_malformed_json() {
    let work = tempfile::tempdir().unwrap();
    let path = work.path().join("pass.json");
    fs::write(&path, "{ not json").unwrap();
    let args = ValidateArgs {
        file: path,
        digest: None,
    };
    assert!(run_validate(&args, &CliConfig::default()).is_err());
}
