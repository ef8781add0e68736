use crate::cli::support::{stdout_json, vetai};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_graph_health_reports_unavailable_ports() {
    let dir = tempdir().unwrap();

    let output = vetai()
        .current_dir(dir.path())
        .env("FALKORDB_HOST", "graph.internal")
        .env("FALKORDB_PORT", "6380")
        .args(["--format", "json", "graph", "health"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["graph_name"], "vetai_knowledge");
    assert_eq!(json["target"], "redis://graph.internal:6380/vetai_knowledge");

    let ports = json["ports"].as_array().unwrap();
    assert_eq!(ports.len(), 2);
    assert!(ports.iter().all(|p| p["available"] == false));
    assert_eq!(ports[1]["detail"], "API_KEY is not set");
}

#[test]
fn test_graph_health_bad_port_env() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .env("FALKORDB_PORT", "not-a-port")
        .args(["graph", "health"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("FALKORDB_PORT"));
}

#[test]
fn test_patient_graph_falls_back_to_empty() {
    let dir = tempdir().unwrap();

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "graph", "patient", "Luna"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 0);
    assert_eq!(json["links"].as_array().unwrap().len(), 0);

    vetai()
        .current_dir(dir.path())
        .args(["graph", "patient", " Luna "])
        .assert()
        .success()
        .stdout(predicate::str::contains("No graph data for patient Luna"));
}

#[test]
fn test_graph_search_offline_returns_no_results() {
    let dir = tempdir().unwrap();

    let output = vetai()
        .current_dir(dir.path())
        .args(["--format", "json", "graph", "search", "otitis", "-n", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["count"], 0);
    assert_eq!(json["results"].as_array().unwrap().len(), 0);

    vetai()
        .current_dir(dir.path())
        .args(["graph", "search", "otitis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No episodes match otitis"));
}

#[test]
fn test_graph_search_rejects_empty_query() {
    let dir = tempdir().unwrap();

    vetai()
        .current_dir(dir.path())
        .args(["graph", "search", "  "])
        .assert()
        .code(2);
}

#[test]
fn test_graph_stats_reports_unavailable() {
    let dir = tempdir().unwrap();

    let output = vetai()
        .current_dir(dir.path())
        .env("GRAPHITI_GRAPH_NAME", "clinic_graph")
        .args(["--format", "json", "graph", "stats"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["graph_name"], "clinic_graph");
    assert_eq!(json["status"], "unavailable");
    assert!(json.get("episode_count").is_none());
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .contains("redis://localhost:6379/clinic_graph"));

    vetai()
        .current_dir(dir.path())
        .args(["graph", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: unavailable"));
}
