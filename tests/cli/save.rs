use std::fs;

use crate::cli::support::{consultation_json, stdout_json, store_dir, vetai};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_save_from_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("visit.json");
    fs::write(&input, consultation_json("consult-1", "2024-03-01T10:00:00Z", "Checkup")).unwrap();

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "save"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["status"], "saved");
    assert_eq!(json["id"], "consult-1");
    assert_eq!(json["graph_indexed"], false);

    let saved = store_dir(dir.path()).join("consult-1.json");
    let content = fs::read_to_string(saved).unwrap();
    assert!(content.contains("\"patientName\": \"Luna\""));
}

#[test]
fn test_save_from_stdin() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .arg("save")
        .write_stdin(consultation_json("consult-2", "2024-03-01T10:00:00Z", "Checkup"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved consultation consult-2"))
        .stdout(predicate::str::contains("Not indexed in knowledge graph"));

    assert!(store_dir(dir.path()).join("consult-2.json").is_file());
}

#[test]
fn test_save_without_index_skips_graph() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .args(["save", "--no-index", "-"])
        .write_stdin(consultation_json("consult-3", "2024-03-01T10:00:00Z", "Checkup"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Not indexed").not());
}

#[test]
fn test_save_rejects_traversal_id() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .arg("save")
        .write_stdin(consultation_json("../escape", "2024-03-01T10:00:00Z", "Checkup"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid consultation record"));

    assert!(!dir.path().join("escape.json").exists());
}

#[test]
fn test_save_empty_input_is_usage_error() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .arg("save")
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no consultation JSON"));
}
