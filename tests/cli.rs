//! Command line behavior of the binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bundler() -> Command {
    Command::cargo_bin("conda_nsis_bundler").unwrap()
}

#[test]
fn help_lists_flags() {
    bundler()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--compression"))
        .stdout(predicate::str::contains("--makensis"));
}

#[test]
fn missing_config_flag_is_usage_error() {
    bundler()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn unreadable_manifest_exits_1() {
    let dir = TempDir::new().unwrap();
    bundler()
        .arg("--config")
        .arg(dir.path().join("installer.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("installer.toml"));
}

#[test]
fn missing_environment_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("installer.toml");
    std::fs::write(&manifest, "[package]\nname = \"snake\"\n").unwrap();

    bundler()
        .arg("--config")
        .arg(&manifest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("environment file"));
}

#[test]
fn invalid_compression_flag_exits_1() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("installer.toml");
    std::fs::write(&manifest, "[package]\nname = \"snake\"\n").unwrap();
    std::fs::write(dir.path().join("environment.yml"), "name: snake\n").unwrap();

    bundler()
        .arg("--config")
        .arg(&manifest)
        .args(["--compression", "rar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid compression"));
}

#[test]
fn unknown_manifest_key_exits_1() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("installer.toml");
    std::fs::write(&manifest, "[package]\nname = \"snake\"\nauthor = \"me\"\n").unwrap();

    bundler()
        .arg("--config")
        .arg(&manifest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TOML error"));
}
