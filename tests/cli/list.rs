use crate::cli::support::{stdout_json, vetai, write_consultation};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_list_newest_first() {
    let dir = tempdir().unwrap();
    write_consultation(dir.path(), "old", "2024-01-01T00:00:00Z", "First visit");
    write_consultation(dir.path(), "new", "2024-06-01T00:00:00Z", "Follow-up");

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["new", "old"]);
    assert_eq!(json[0]["vetName"], "Dr. Vega");
}

#[test]
fn test_list_limit_and_patient_filter() {
    let dir = tempdir().unwrap();
    write_consultation(dir.path(), "a", "2024-01-01T00:00:00Z", "One");
    write_consultation(dir.path(), "b", "2024-01-02T00:00:00Z", "Two");

    vetai()
        .current_dir(dir.path())
        .args(["list", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b  2024-01-02T00:00:00Z  Luna (Canine)  Dr. Vega"))
        .stdout(predicate::str::contains("a  ").not());

    vetai()
        .current_dir(dir.path())
        .args(["list", "--patient", "milo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No consultations found"));
}

#[test]
fn test_list_skips_corrupt_files() {
    let dir = tempdir().unwrap();
    let path = write_consultation(dir.path(), "good", "2024-01-01T00:00:00Z", "One");
    std::fs::write(path.with_file_name("broken.json"), "{ nope").unwrap();

    vetai()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("good"));
}
