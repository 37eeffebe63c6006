//! CLI integration tests
//!
//! These tests run the manifest-triage binary end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn cli() -> Command {
    Command::cargo_bin("manifest-triage").expect("Binary not found")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest-triage"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_cli_without_arguments_is_usage_error() {
    cli()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_with_extra_argument_is_usage_error() {
    cli()
        .args(["a.xml", "b.xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_report_sections() {
    let manifest = fixtures_path().join("AndroidManifest.xml");

    let output = cli()
        .arg("--no-color")
        .arg(&manifest)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let headers = [
        "== Permissões ==",
        "== Activities ==",
        "== Services ==",
        "== Broadcast Receivers ==",
    ];
    let positions: Vec<_> = headers
        .iter()
        .map(|h| stdout.find(h).unwrap_or_else(|| panic!("missing {}", h)))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(stdout.contains("1. android.permission.INTERNET\n"));
    assert!(stdout.contains("5. com.example.triage.permission.C2D_MESSAGE\n"));
    assert!(stdout.contains("│ Activity │ .MainActivity"));
    assert!(stdout.contains("\n\n== Services =="));
}

#[test]
fn test_cli_missing_file() {
    let missing = fixtures_path().join("nope.xml");

    cli()
        .arg(&missing)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(format!(
            "Erro: O arquivo '{}' não foi encontrado.",
            missing.display()
        )))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_cli_malformed_file() {
    let not_xml = fixtures_path().join("not_xml.txt");

    cli()
        .arg(&not_xml)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!(
            "Erro: O arquivo '{}' não é um XML válido.",
            not_xml.display()
        )))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_cli_empty_manifest() {
    cli()
        .arg("--no-color")
        .arg(fixtures_path().join("empty_manifest.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Nenhuma permissão declarada."))
        .stdout(predicate::str::contains("Nenhum componente encontrado."));
}

#[test]
fn test_cli_json_output() {
    let output = cli()
        .args(["--format", "json"])
        .arg(fixtures_path().join("AndroidManifest.xml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["permissions"][0]["name"], "android.permission.INTERNET");
    assert_eq!(value["activities"][1]["priority"], "has_entry_points");
    assert_eq!(value["summary"]["components"], 6);
}

#[test]
fn test_cli_output_file_and_config() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let manifest = temp.path().join("AndroidManifest.xml");
    std::fs::copy(fixtures_path().join("AndroidManifest.xml"), &manifest).unwrap();
    std::fs::write(
        temp.path().join(".manifest-triage.toml"),
        "[report]\nformat = \"json\"\ncolor = false\n",
    )
    .unwrap();
    let report = temp.path().join("report.json");

    cli()
        .arg(&manifest)
        .arg("--output")
        .arg(&report)
        .assert()
        .success();

    let written = std::fs::read_to_string(&report).unwrap();
    assert!(written.contains("\"critical_permissions\": 3"));
}
