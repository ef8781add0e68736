use std::fs;

use crate::cli::support::{seed_duplicates, stdout_json, stored_files, vetai};
use tempfile::tempdir;

fn write_config(root: &std::path::Path, auto_compact: &str) {
    fs::write(
        root.join("vetai.toml"),
        format!("[auto_compact]\n{}\n", auto_compact),
    )
    .unwrap();
}

#[test]
fn test_start_without_auto_compact() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "start"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["auto_compact"]["status"], "disabled");
    assert_eq!(json["ports"].as_array().unwrap().len(), 2);
    assert_eq!(stored_files(dir.path()).len(), 3);
}

#[test]
fn test_start_unconfirmed_auto_compact_is_skipped() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());
    write_config(dir.path(), "enabled = true");

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "start"])
        .output()
        .unwrap();
    assert!(output.status.success());

    assert_eq!(stdout_json(&output)["auto_compact"]["status"], "unconfirmed");
    assert_eq!(stored_files(dir.path()).len(), 3);
}

#[test]
fn test_start_confirmed_auto_compact_runs() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());
    write_config(
        dir.path(),
        "enabled = true\nconfirm = \"DELETE_DUPLICATES\"\nbackup = false",
    );

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "start"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["auto_compact"]["status"], "ran");
    assert_eq!(json["auto_compact"]["result"]["duplicates_removed"], 2);
    assert_eq!(stored_files(dir.path()), ["c.json"]);
}

#[test]
fn test_start_creates_missing_store() {
    let dir = tempdir().unwrap();

    vetai().current_dir(dir.path()).arg("start").assert().success();
    assert!(dir.path().join("consultation_data").is_dir());
}
