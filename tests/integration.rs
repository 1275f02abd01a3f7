//! Integration tests for the payroll engine.
//!
//! This test suite drives the HTTP router end to end:
//! - Record listing, filtering and search
//! - Payroll summary before and after a batch run
//! - Batch run completion, rejection, and cancellation
//! - Configuration edits during a run
//! - Hold release and record replacement

use std::str::FromStr;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(&config).expect("Failed to build state")
}

fn router(state: &AppState) -> Router {
    create_router(state.clone())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn get(state: &AppState, uri: &str) -> Value {
    let (status, body) = send(state, "GET", uri, None).await;
    assert_eq!(status, StatusCode::OK, "GET {} failed: {}", uri, body);
    body
}

fn assert_amount(value: &Value, expected: &str) {
    let actual = value.as_str().unwrap_or_else(|| panic!("not a decimal string: {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

async fn record(state: &AppState, id: &str) -> Value {
    let records = get(state, &format!("/records?q={}", id)).await;
    records
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == id)
        .cloned()
        .unwrap_or_else(|| panic!("record {} not found", id))
}

/// Starts a run and lets the paused clock carry it to completion.
async fn run_batch_to_completion(state: &AppState) {
    let (status, body) = send(state, "POST", "/batch", None).await;
    assert_eq!(status, StatusCode::ACCEPTED, "start failed: {}", body);
    tokio::time::sleep(Duration::from_secs(2)).await;

    let progress = get(state, "/batch").await;
    assert_eq!(progress["phase"], "completed");
    assert_eq!(progress["progress"], 100);
}

// =============================================================================
// Records
// =============================================================================

#[tokio::test]
async fn test_filter_by_status_preserves_order() {
    let state = create_test_state();

    let pending = get(&state, "/records?status=pending").await;
    let ids: Vec<&str> = pending
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec!["EMP001", "EMP003", "EMP005", "EMP007", "EMP008"]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let state = create_test_state();

    let found = get(&state, "/records?q=PRIYA").await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], "EMP002");

    let by_id = get(&state, "/records?q=emp006").await;
    assert_eq!(by_id[0]["name"], "Kavya Reddy");
}

#[tokio::test]
async fn test_replace_record() {
    let state = create_test_state();

    let (status, _) = send(
        &state,
        "PUT",
        "/records/EMP005",
        Some(json!({
            "name": "Vikram Singh",
            "designation": "Senior Sales Executive",
            "department": "Sales",
            "basic_salary": "40000",
            "status": "pending"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated = record(&state, "EMP005").await;
    assert_eq!(updated["designation"], "Senior Sales Executive");
    assert_amount(&updated["basic_salary"], "40000");
}

#[tokio::test]
async fn test_replace_rejects_salary_and_status_changes() {
    let state = create_test_state();
    let before = record(&state, "EMP005").await;

    for body in [
        json!({"name": "Vikram Singh", "designation": "Sales", "department": "Sales", "basic_salary": "45000"}),
        json!({"name": "Vikram Singh", "designation": "Sales", "department": "Sales", "status": "processed"}),
        json!({"name": "Vikram Singh", "designation": "Sales", "department": "Sales", "tax": "1"}),
    ] {
        let (status, response) = send(&state, "PUT", "/records/EMP005", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["code"], "INVALID_RECORD");
    }

    assert_eq!(record(&state, "EMP005").await, before);
    assert_eq!(get(&state, "/summary").await["pending_count"], 5);
}

// =============================================================================
// Summary
// =============================================================================

#[tokio::test]
async fn test_summary_before_any_run() {
    let state = create_test_state();
    let summary = get(&state, "/summary").await;

    assert_amount(&summary["total_gross"], "530700");
    assert_amount(&summary["total_net"], "130670");
    assert_amount(&summary["total_deductions"], "400030");
    assert_amount(&summary["total_tax"], "16070");
    assert_amount(&summary["total_pf"], "27120");
    assert_amount(&summary["total_prof_tax"], "1600");
    assert_eq!(summary["record_count"], 8);
    assert_eq!(summary["pending_count"], 5);
    assert_eq!(summary["processed_count"], 2);
    assert_eq!(summary["hold_count"], 1);
}

// =============================================================================
// Batch runs
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_batch_run_processes_pending_records() {
    let state = create_test_state();

    run_batch_to_completion(&state).await;

    let emp1 = record(&state, "EMP001").await;
    assert_eq!(emp1["status"], "processed");
    assert_amount(&emp1["allowances"], "35250");
    assert_amount(&emp1["tax"], "12025");
    assert_amount(&emp1["pf"], "10200");
    assert_amount(&emp1["deductions"], "22425");
    assert_amount(&emp1["net_salary"], "97825");

    let summary = get(&state, "/summary").await;
    assert_amount(&summary["total_gross"], "660950");
    assert_amount(&summary["total_net"], "488695");
    assert_amount(&summary["total_deductions"], "172255");
    assert_amount(&summary["total_tax"], "60095");
    assert_amount(&summary["total_pf"], "101520");
    assert_amount(&summary["total_prof_tax"], "1600");
    assert_eq!(summary["pending_count"], 0);
    assert_eq!(summary["processed_count"], 7);
}

#[tokio::test(start_paused = true)]
async fn test_processed_and_held_records_untouched() {
    let state = create_test_state();
    let processed_before = record(&state, "EMP002").await;
    let held_before = record(&state, "EMP004").await;

    run_batch_to_completion(&state).await;

    assert_eq!(record(&state, "EMP002").await, processed_before);
    assert_eq!(record(&state, "EMP004").await, held_before);
}

#[tokio::test(start_paused = true)]
async fn test_second_run_after_completion_is_rejected() {
    let state = create_test_state();
    run_batch_to_completion(&state).await;
    let records_after_first = get(&state, "/records").await;

    let (status, body) = send(&state, "POST", "/batch", None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_PENDING_RECORDS");
    assert_eq!(get(&state, "/records").await, records_after_first);
}

#[tokio::test(start_paused = true)]
async fn test_start_while_running_is_rejected() {
    let state = create_test_state();

    let (first, started) = send(&state, "POST", "/batch", None).await;
    assert_eq!(first, StatusCode::ACCEPTED);
    // Ticks land at 150, 300 and 450ms.
    tokio::time::sleep(Duration::from_millis(500)).await;

    let (second, body) = send(&state, "POST", "/batch", None).await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], "BATCH_RUNNING");

    let progress = get(&state, "/batch").await;
    assert_eq!(progress["progress"], 30);
    assert_eq!(progress["run_id"], started["run_id"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_run_leaves_records_unchanged() {
    let state = create_test_state();
    let records_before = get(&state, "/records").await;

    send(&state, "POST", "/batch", None).await;
    tokio::time::sleep(Duration::from_millis(700)).await;

    let (status, body) = send(&state, "DELETE", "/batch", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cancelled"], true);
    assert_eq!(body["progress"]["progress"], 0);
    assert_eq!(body["progress"]["is_running"], false);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(get(&state, "/records").await, records_before);
    assert_eq!(get(&state, "/batch").await["phase"], "idle");
}

#[tokio::test(start_paused = true)]
async fn test_config_edit_mid_run_applies_at_completion() {
    let state = create_test_state();

    send(&state, "POST", "/batch", None).await;
    tokio::time::sleep(Duration::from_millis(400)).await;

    let (status, config) = send(
        &state,
        "PATCH",
        "/config",
        Some(json!({"key": "pfEnabled", "value": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["pf_enabled"], false);

    tokio::time::sleep(Duration::from_secs(2)).await;

    let emp1 = record(&state, "EMP001").await;
    assert_amount(&emp1["pf"], "0");
    assert_amount(&emp1["net_salary"], "108025");
    // Already-processed records keep their provident fund.
    assert_amount(&record(&state, "EMP002").await["pf"], "7800");
}

#[tokio::test(start_paused = true)]
async fn test_released_hold_is_processed_by_next_run() {
    let state = create_test_state();

    let (status, released) = send(&state, "POST", "/records/EMP004/release", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(released["status"], "pending");

    run_batch_to_completion(&state).await;

    let emp4 = record(&state, "EMP004").await;
    assert_eq!(emp4["status"], "processed");
    assert_amount(&emp4["allowances"], "25250");
    assert_amount(&emp4["net_salary"], "69325");
}

#[tokio::test]
async fn test_config_round_trip() {
    let state = create_test_state();

    let (status, _) = send(
        &state,
        "PATCH",
        "/config",
        Some(json!({"key": "hra_percent", "value": "25"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let config = get(&state, "/config").await;
    assert_amount(&config["hra_percent"], "25");
    assert_amount(&config["tds_rate"], "10");
}

#[tokio::test]
async fn test_config_unknown_key_rejected() {
    let state = create_test_state();

    let (status, body) = send(
        &state,
        "PATCH",
        "/config",
        Some(json!({"key": "bonus_percent", "value": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
