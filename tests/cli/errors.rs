use crate::cli::support::vetai;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_lists_commands() {
    vetai()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: vetai"))
        .stdout(predicate::str::contains("compact"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("graph"));
}

#[test]
fn test_no_command_prints_version() {
    vetai()
        .assert()
        .success()
        .stdout(predicate::str::contains("vetai "));
}

#[test]
fn test_missing_store_is_data_error() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .code(3)
        .stderr(predicate::str::starts_with("error: record store not found"));
}

#[test]
fn test_json_error_envelope() {
    let dir = tempdir().unwrap();

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "store_not_found");
    assert_eq!(json["error"]["code"], 3);
}

#[test]
fn test_json_envelope_for_bad_arguments() {
    let output = vetai()
        .args(["--format", "json", "compact", "--bogus"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("vetai.toml"), "[rate_limit]\nmax_requests = 0\n").unwrap();

    vetai()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rate_limit.max_requests"));
}
