use crate::cli::support::{stdout_json, store_dir, vetai};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_init_creates_store_and_config() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized vetai store"));

    assert!(store_dir(dir.path()).is_dir());
    assert!(dir.path().join("vetai.toml").is_file());
}

#[test]
fn test_init_idempotent() {
    let dir = tempdir().unwrap();

    vetai().current_dir(dir.path()).arg("init").assert().success();

    let output = vetai()
        .current_dir(dir.path())
        .args(["init", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["config_created"], false);
}

#[test]
fn test_init_with_explicit_store() {
    let dir = tempdir().unwrap();

    vetai()
        .arg("--root")
        .arg(dir.path())
        .args(["--store", "records", "init"])
        .assert()
        .success();

    assert!(dir.path().join("records").is_dir());
    assert!(!store_dir(dir.path()).exists());
}

#[test]
fn test_init_honors_store_env() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .env("VETAI_STORE_DIR", "from-env")
        .arg("init")
        .assert()
        .success();

    assert!(dir.path().join("from-env").is_dir());
}
