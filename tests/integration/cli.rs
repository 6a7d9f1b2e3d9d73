//! The `chartgen` binary: arguments, output and exit status.

use assert_cmd::Command;
use kube_chartgen::test_utils::ManifestFixture;
use predicates::prelude::*;
use tempfile::TempDir;

fn chartgen() -> Command {
    let mut cmd = Command::cargo_bin("chartgen").unwrap();
    cmd.env_remove("CHARTGEN_MANIFEST").env_remove("CHARTGEN_OUTPUT").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_generate_prints_summary() {
    let temp = TempDir::new().unwrap();
    let manifest = ManifestFixture::minimal().write_to(temp.path()).unwrap();
    let output = temp.path().join("chart");

    chartgen()
        .arg("--manifest")
        .arg(&manifest)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Helm chart for keycloak-operator 26.0.0 in"));

    assert!(output.join("templates/deployment.yaml").is_file());
}

#[test]
fn test_default_output_directory() {
    let temp = TempDir::new().unwrap();
    let manifest = ManifestFixture::minimal().write_to(temp.path()).unwrap();

    chartgen().current_dir(temp.path()).arg("--manifest").arg(&manifest).assert().success();

    assert!(temp.path().join("chart/Chart.yaml").is_file());
}

#[test]
fn test_manifest_from_environment() {
    let temp = TempDir::new().unwrap();
    let manifest = ManifestFixture::minimal().write_to(temp.path()).unwrap();

    chartgen()
        .env("CHARTGEN_MANIFEST", &manifest)
        .env("CHARTGEN_OUTPUT", temp.path().join("from-env"))
        .arg("--quiet")
        .assert()
        .success();

    assert!(temp.path().join("from-env/values.yaml").is_file());
}

#[test]
fn test_missing_manifest_argument_fails() {
    chartgen().assert().failure().stderr(predicate::str::contains("--manifest"));
}

#[test]
fn test_invalid_manifest_exits_with_status_one() {
    let temp = TempDir::new().unwrap();
    let manifest = ManifestFixture::minimal().without_deployment().write_to(temp.path()).unwrap();
    let output = temp.path().join("chart");

    chartgen()
        .arg("--manifest")
        .arg(&manifest)
        .arg("--output")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No usable application version"));

    assert!(!output.exists());
}

#[test]
fn test_unreadable_manifest_names_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.yml");

    chartgen()
        .arg("--manifest")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope.yml"));
}
