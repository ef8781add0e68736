use std::fs;

use crate::cli::support::{seed_duplicates, stdout_json, stored_files, vetai, write_consultation};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_compact_keeps_newest_and_backs_up_the_rest() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["duplicates_removed"], 2);
    assert_eq!(json["remaining_consultations"], 1);
    assert_eq!(json["dry_run"], false);
    assert_eq!(json["files_deleted"].as_array().unwrap().len(), 0);

    assert_eq!(stored_files(dir.path()), ["c.json"]);

    let backup_dir = json["backup_dir"].as_str().unwrap();
    assert!(backup_dir.contains("consultation_backup"));
    let mut backed_up: Vec<_> = fs::read_dir(backup_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    backed_up.sort();
    assert_eq!(backed_up, ["a.json", "b.json"]);
}

#[test]
fn test_compact_dry_run_touches_nothing() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    vetai()
        .current_dir(dir.path())
        .args(["compact", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dry run: would remove 2 duplicate consultations",
        ));

    assert_eq!(stored_files(dir.path()), ["a.json", "b.json", "c.json"]);
    assert!(!dir.path().join("consultation_backup").exists());
}

#[test]
fn test_compact_no_backup_deletes() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "compact", "--no-backup"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["files_deleted"].as_array().unwrap().len(), 2);
    assert!(json["backup_dir"].is_null());
    assert_eq!(stored_files(dir.path()), ["c.json"]);
    assert!(!dir.path().join("consultation_backup").exists());
}

#[test]
fn test_compact_custom_backup_dir() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    vetai()
        .current_dir(dir.path())
        .args(["compact", "--backup-dir", "old-visits"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 duplicate consultations"));

    assert!(dir.path().join("old-visits/a.json").is_file());
    assert!(dir.path().join("old-visits/b.json").is_file());
}

#[test]
fn test_compact_rejects_backup_dir_outside_allowed_roots() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    vetai()
        .current_dir(dir.path())
        .args(["compact", "--backup-dir", "/etc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid backup directory"));

    vetai()
        .current_dir(dir.path())
        .args(["compact", "--backup-dir", "../../escape"])
        .assert()
        .code(2);

    assert_eq!(stored_files(dir.path()), ["a.json", "b.json", "c.json"]);
}

#[test]
fn test_compact_backup_dir_conflicts_with_no_backup() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .args(["compact", "--no-backup", "--backup-dir", "x"])
        .assert()
        .code(2);
}

#[test]
fn test_compact_is_idempotent() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());
    write_consultation(dir.path(), "d", "2024-01-01T00:00:00Z", "Dental cleaning");

    vetai().current_dir(dir.path()).arg("compact").assert().success();

    vetai()
        .current_dir(dir.path())
        .arg("compact")
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found (2 consultations)"));
}

#[test]
fn test_empty_content_records_are_kept() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("consultation_data");
    fs::create_dir_all(&store).unwrap();
    fs::write(store.join("e1.json"), r#"{"id": "e1", "timestamp": "2024-01-01T00:00:00Z"}"#).unwrap();
    fs::write(store.join("e2.json"), r#"{"id": "e2", "timestamp": "2024-01-02T00:00:00Z"}"#).unwrap();

    vetai()
        .current_dir(dir.path())
        .arg("compact")
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found"));

    assert_eq!(stored_files(dir.path()), ["e1.json", "e2.json"]);
}

#[test]
fn test_null_field_records_are_kept_and_compacted() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("consultation_data");
    fs::create_dir_all(&store).unwrap();
    fs::write(
        store.join("e1.json"),
        r#"{"id": "e1", "timestamp": "2024-01-01T00:00:00Z", "vetName": null, "summary": null}"#,
    )
    .unwrap();
    for (id, day) in [("d1", 2), ("d2", 3)] {
        fs::write(
            store.join(format!("{}.json", id)),
            format!(
                r#"{{"id": "{}", "timestamp": "2024-01-0{}T00:00:00Z", "vetName": null, "patientName": "Luna", "summary": "Otitis"}}"#,
                id, day
            ),
        )
        .unwrap();
    }

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "compact", "--no-backup"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["duplicates_removed"], 1);
    assert_eq!(json["remaining_consultations"], 2);
    assert_eq!(stored_files(dir.path()), ["d2.json", "e1.json"]);
}

#[test]
fn test_compact_reports_failed_moves() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    // Existing copies block every move into the archive
    let archive = dir.path().join("archive");
    fs::create_dir_all(&archive).unwrap();
    fs::write(archive.join("a.json"), "stale").unwrap();
    fs::write(archive.join("b.json"), "stale").unwrap();

    vetai()
        .current_dir(dir.path())
        .args(["compact", "--backup-dir", "archive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to remove 2 duplicate consultations"))
        .stdout(predicate::str::contains("No duplicates found").not());

    assert_eq!(stored_files(dir.path()), ["a.json", "b.json", "c.json"]);

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "compact", "--backup-dir", "archive"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["duplicates_removed"], 0);
    assert_eq!(json["files_failed"].as_array().unwrap().len(), 2);
}
