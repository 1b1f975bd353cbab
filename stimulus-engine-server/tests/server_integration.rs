//! Integration tests for the trial server.
//!
//! These tests start a real axum server on a random port and query it over
//! HTTP, serving the root package's materials fixtures.

use stimulus_engine::core::store::MaterialsStore;
use stimulus_engine_server::{spawn_server, AppState};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../tests/fixtures");

/// Helper: spawn a seeded test server on port 0 (random available port).
async fn spawn_test_server(seed: u64) -> String {
    let state = AppState::new(MaterialsStore::new(FIXTURES)).with_seed(seed);
    let addr = spawn_server(state, ([127, 0, 0, 1], 0).into())
        .await
        .unwrap();
    format!("http://{addr}")
}

async fn get(url: String) -> (u16, String) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.text().await.unwrap())
}

// ── Success ──────────────────────────────────────────────────────────

#[tokio::test]
async fn renders_trial_set() {
    let base = spawn_test_server(1).await;

    let resp = reqwest::get(format!(
        "{base}/trials/02_acceptability_swarm?materials=swarm-000,swarm-fillers-acceptability"
    ))
    .await
    .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["experiment"], "02_acceptability_swarm");
    assert_eq!(json["materials_id"], "swarm-000,swarm-fillers-acceptability");

    let trials = json["trials"].as_array().unwrap();
    assert_eq!(trials.len(), 38);
    let fillers = trials
        .iter()
        .filter(|t| t["condition_id"][0] == "filler")
        .count();
    assert_eq!(fillers, 20);
    for trial in trials {
        assert!(trial["sentence"].is_string());
    }
}

#[tokio::test]
async fn identifiers_are_trimmed() {
    let base = spawn_test_server(2).await;
    let (status, body) = get(format!(
        "{base}/trials/00_comprehension_swarm-construction-meaning?materials=swarm-000,%20swarm-fillers-comprehension"
    ))
    .await;
    assert_eq!(status, 200, "{body}");
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["materials_id"], "swarm-000,swarm-fillers-comprehension");
}

#[tokio::test]
async fn same_seed_same_first_trial_set() {
    let url = "/trials/04_comprehension_swarm-full?materials=swarm-000,swarm-fillers-comprehension";
    let (_, first) = get(format!("{}{url}", spawn_test_server(9).await)).await;
    let (_, second) = get(format!("{}{url}", spawn_test_server(9).await)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn lists_experiments() {
    let base = spawn_test_server(3).await;
    let resp = reqwest::get(format!("{base}/experiments")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let names: Vec<String> = resp.json().await.unwrap();
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "00_comprehension_swarm-construction-meaning");
    assert!(names.contains(&"07_comprehension_spray-load-construction-meaning-with-images".to_string()));
}

// ── Client errors ────────────────────────────────────────────────────

#[tokio::test]
async fn missing_materials_is_bad_request() {
    let base = spawn_test_server(4).await;
    let (status, body) = get(format!("{base}/trials/02_acceptability_swarm")).await;
    assert_eq!(status, 400);
    assert!(body.contains("materials"), "{body}");
}

#[tokio::test]
async fn single_identifier_is_bad_request() {
    let base = spawn_test_server(4).await;
    let (status, _) = get(format!("{base}/trials/02_acceptability_swarm?materials=swarm-000")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn traversal_is_bad_request() {
    let base = spawn_test_server(5).await;
    let (status, body) = get(format!(
        "{base}/trials/02_acceptability_swarm?materials=..%2Ffixtures%2Fswarm-000,swarm-fillers-acceptability"
    ))
    .await;
    assert_eq!(status, 400);
    assert!(body.contains("invalid materials identifier"), "{body}");
}

#[tokio::test]
async fn unknown_experiment_is_not_found() {
    let base = spawn_test_server(6).await;
    let (status, body) = get(format!(
        "{base}/trials/10_unknown?materials=swarm-000,swarm-fillers-acceptability"
    ))
    .await;
    assert_eq!(status, 404);
    assert!(body.contains("10_unknown"), "{body}");
}

#[tokio::test]
async fn missing_materials_file_is_not_found() {
    let base = spawn_test_server(6).await;
    let (status, _) = get(format!(
        "{base}/trials/02_acceptability_swarm?materials=swarm-999,swarm-fillers-acceptability"
    ))
    .await;
    assert_eq!(status, 404);
}

// ── Server errors ────────────────────────────────────────────────────

#[tokio::test]
async fn insufficient_materials_is_server_error() {
    let base = spawn_test_server(7).await;
    let (status, body) = get(format!(
        "{base}/trials/05_comprehension_spray-load-construction-meaning?materials=swarm-000,spray-fillers-comprehension"
    ))
    .await;
    assert_eq!(status, 500);
    assert!(body.contains("insufficient materials"), "{body}");
}

#[tokio::test]
async fn malformed_materials_is_server_error() {
    let base = spawn_test_server(8).await;
    let (status, _) = get(format!(
        "{base}/trials/02_acceptability_swarm?materials=swarm-000,broken-materials"
    ))
    .await;
    assert_eq!(status, 500);
}
