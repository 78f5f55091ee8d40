//! End-to-end CLI tests for the sentinel-dl binary.
//!
//! None of these reach the network: each run either stops at argument
//! parsing or fails before the first request.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Builds a command isolated from the user's config, log filter and cwd.
fn sentinel_cmd(work_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sentinel-dl").unwrap();
    cmd.current_dir(work_dir.path())
        .env("XDG_CONFIG_HOME", work_dir.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_credentials(work_dir: &TempDir) {
    std::fs::write(work_dir.path().join(".credentials"), "alice:s3cret\n").unwrap();
}

/// -h, -H and --help print usage and exit 0.
#[test]
fn test_binary_help_flags_display_usage() {
    let work_dir = TempDir::new().unwrap();
    for flag in ["-h", "-H", "--help"] {
        sentinel_cmd(&work_dir)
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"))
            .stdout(predicate::str::contains("USER:PASSWORD"));
    }
}

/// Help does not touch credentials or the network even when a URI is given.
#[test]
fn test_binary_help_with_uri_exits_zero_without_credentials() {
    let work_dir = TempDir::new().unwrap();
    sentinel_cmd(&work_dir)
        .args([
            "https://scihub.esa.int/dhus/odata/v1/Products('abc')/$value",
            "-H",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("metalink"));
}

#[test]
fn test_binary_version_displays_version() {
    let work_dir = TempDir::new().unwrap();
    sentinel_cmd(&work_dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentinel-dl"));
}

#[test]
fn test_binary_missing_uri_returns_error() {
    let work_dir = TempDir::new().unwrap();
    sentinel_cmd(&work_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("URI"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let work_dir = TempDir::new().unwrap();
    sentinel_cmd(&work_dir)
        .args(["--invalid-flag", "cart.meta4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// A missing credentials file fails with exit 1 and explains the format.
#[test]
fn test_binary_missing_credentials_file_fails() {
    let work_dir = TempDir::new().unwrap();
    sentinel_cmd(&work_dir)
        .arg("https://scihub.esa.int/dhus/odata/v1/Products('abc')/$value")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".credentials"))
        .stderr(predicate::str::contains("USER:PASSWORD"));
}

#[test]
fn test_binary_malformed_credentials_file_fails() {
    let work_dir = TempDir::new().unwrap();
    std::fs::write(work_dir.path().join(".credentials"), "no-colon-here\n").unwrap();
    sentinel_cmd(&work_dir)
        .arg("https://scihub.esa.int/dhus/odata/v1/Products('abc')/$value")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("USER:PASSWORD"));
}

/// An argument that is neither a URL nor an existing file fails.
#[test]
fn test_binary_unknown_uri_fails() {
    let work_dir = TempDir::new().unwrap();
    write_credentials(&work_dir);
    sentinel_cmd(&work_dir)
        .arg("not-a-file-or-link")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("can't find file or link"));
}

#[test]
fn test_binary_malformed_url_fails() {
    let work_dir = TempDir::new().unwrap();
    write_credentials(&work_dir);
    sentinel_cmd(&work_dir)
        .arg("http://")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

/// A well-formed URL outside the portal's search and download patterns fails
/// before any request is made.
#[test]
fn test_binary_foreign_url_fails() {
    let work_dir = TempDir::new().unwrap();
    write_credentials(&work_dir);
    sentinel_cmd(&work_dir)
        .arg("https://example.com/products/abc.zip")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a valid scihub URL"));
}

#[test]
fn test_binary_invalid_config_file_fails() {
    let work_dir = TempDir::new().unwrap();
    write_credentials(&work_dir);
    let config_dir = work_dir.path().join("config").join("sentinel-dl");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "concurrency = 4\n").unwrap();
    sentinel_cmd(&work_dir)
        .arg("cart.meta4")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config"));
}

/// A metalink file that is not XML fails the whole run.
#[test]
fn test_binary_invalid_metalink_file_fails() {
    let work_dir = TempDir::new().unwrap();
    write_credentials(&work_dir);
    std::fs::write(work_dir.path().join("cart.meta4"), "definitely not xml").unwrap();
    sentinel_cmd(&work_dir)
        .arg("cart.meta4")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cart.meta4"));
}

/// `--log-file` writes to a dated file next to the given path.
#[test]
fn test_binary_log_file_is_dated() {
    let work_dir = TempDir::new().unwrap();
    let log_dir = work_dir.path().join("logs");
    sentinel_cmd(&work_dir)
        .arg("--log-file")
        .arg(log_dir.join("run.log"))
        .arg("https://scihub.esa.int/dhus/odata/v1/Products('abc')/$value")
        .assert()
        .code(1);

    let entries: Vec<_> = std::fs::read_dir(&log_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "{entries:?}");
    let name = entries[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("run.log."), "{name}");
    let content = std::fs::read_to_string(&entries[0]).unwrap();
    assert!(content.contains("sentinel-dl starting"), "{content}");
}
