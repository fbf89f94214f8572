//! CLI integration tests using the real kpkg binary

mod common;

use common::TestHome;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    let home = TestHome::new();

    home.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("integration packages"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("reload"));
}

#[test]
fn test_version_output() {
    let home = TestHome::new();

    home.cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "kpkg {}",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("Plugin API: v1.0.0"));
}

#[test]
fn test_completions_output() {
    let home = TestHome::new();

    home.cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kpkg"));
}

#[test]
fn test_missing_config_file() {
    let home = TestHome::new();

    home.cmd()
        .env("KPKG_CONFIG", home.temp.path().join("absent.yaml"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_config_flag_overrides_env() {
    let home = TestHome::new();
    let other = home.temp.path().join("other.yaml");
    std::fs::write(&other, "repository_url: not a url\n").unwrap();

    home.cmd()
        .args(["--config", other.to_str().unwrap(), "list"])
        .env_remove("KPKG_REPOSITORY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_invalid_config_yaml() {
    let home = TestHome::new();
    home.configure("platform: [\n");

    home.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let home = TestHome::new();
    home.install("s3", "v1.0.0");

    home.cmd()
        .args(["--verbose", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Opened store"));
}

#[test]
fn test_log_filter_from_env() {
    let home = TestHome::new();

    home.cmd()
        .env("KPKG_LOG", "off")
        .args(["--verbose", "list"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
