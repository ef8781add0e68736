use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};

/// Environment variables that would leak host configuration into a test
const ISOLATED_ENV: &[&str] = &[
    "VETAI_STORE_DIR",
    "VETAI_CLIENT",
    "VETAI_LOG",
    "RUST_LOG",
    "FALKORDB_HOST",
    "FALKORDB_PORT",
    "GRAPHITI_GRAPH_NAME",
    "API_KEY",
];

/// Get a Command for vetai with a clean environment
pub fn vetai() -> Command {
    let mut cmd = cargo_bin_cmd!("vetai");
    for var in ISOLATED_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// Default store directory under a test root
pub fn store_dir(root: &Path) -> PathBuf {
    root.join("consultation_data")
}

/// Write a consultation file straight into the default store
pub fn write_consultation(root: &Path, id: &str, timestamp: &str, summary: &str) -> PathBuf {
    let store = store_dir(root);
    fs::create_dir_all(&store).unwrap();
    let path = store.join(format!("{}.json", id));
    fs::write(&path, consultation_json(id, timestamp, summary)).unwrap();
    path
}

pub fn consultation_json(id: &str, timestamp: &str, summary: &str) -> String {
    serde_json::json!({
        "id": id,
        "timestamp": timestamp,
        "vetName": "Dr. Vega",
        "ownerName": "Ana",
        "patientName": "Luna",
        "species": "Canine",
        "summary": summary,
        "transcription": "Owner reports the dog is doing well.",
    })
    .to_string()
}

/// Three copies of one consultation saved at different times
pub fn seed_duplicates(root: &Path) {
    write_consultation(root, "a", "2024-01-01T00:00:00Z", "Vaccination");
    write_consultation(root, "b", "2024-01-02T00:00:00Z", "Vaccination");
    write_consultation(root, "c", "2024-01-03T00:00:00Z", "Vaccination");
}

/// Record file names in the default store, sorted
pub fn stored_files(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(store_dir(root))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
