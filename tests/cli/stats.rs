use crate::cli::support::{seed_duplicates, stdout_json, stored_files, vetai};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_stats_reports_potential_savings() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "stats"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["total_files"], 3);
    assert_eq!(json["consultation_count"], 3);
    assert_eq!(json["potential_duplicates"], 2);
    let total = json["total_size_bytes"].as_u64().unwrap();
    assert_eq!(json["potential_space_recovery_bytes"], 2 * (total / 3));

    assert_eq!(stored_files(dir.path()), ["a.json", "b.json", "c.json"]);
}

#[test]
fn test_stats_human() {
    let dir = tempdir().unwrap();
    seed_duplicates(dir.path());

    vetai()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicates:     2"));
}
