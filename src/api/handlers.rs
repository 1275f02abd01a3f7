//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::batch::{BatchProgress, PayrollLedger};
use crate::config::PayrollConfig;
use crate::error::PayrollError;
use crate::models::{PayrollSummary, RecordStatus, SalaryRecord};

use super::request::{ConfigUpdateRequest, RecordQuery, RecordReplaceRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/records", get(list_records_handler))
        .route("/records/:id", put(replace_record_handler))
        .route("/records/:id/release", post(release_hold_handler))
        .route("/records/:id/hold", post(hold_record_handler))
        .route("/summary", get(summary_handler))
        .route("/config", get(get_config_handler).patch(update_config_handler))
        .route(
            "/batch",
            get(batch_progress_handler)
                .post(start_batch_handler)
                .delete(cancel_batch_handler),
        )
        .with_state(state)
}

/// Body returned by `POST /batch`.
#[derive(Debug, Serialize)]
struct BatchStarted {
    run_id: Uuid,
    progress: BatchProgress,
}

/// Body returned by `DELETE /batch`.
#[derive(Debug, Serialize)]
struct BatchCancelled {
    cancelled: bool,
    progress: BatchProgress,
}

fn json_rejection(rejection: JsonRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(error = %body_text, "Rejected request body");
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::malformed_json(body_text))
}

/// Handler for `GET /records`.
///
/// Applies the status filter and the search query together; either may be
/// omitted.
async fn list_records_handler(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Json<Vec<SalaryRecord>> {
    let ledger = state.ledger().lock().await;
    let records = ledger.records();
    let search = query.q.as_deref().unwrap_or("");

    let matched: Vec<SalaryRecord> = records
        .search(search)
        .into_iter()
        .filter(|r| query.status.is_none_or(|status| r.status == status))
        .cloned()
        .collect();

    Json(matched)
}

/// Handler for `PUT /records/{id}`.
async fn replace_record_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecordReplaceRequest>, JsonRejection>,
) -> ApiResult<Json<SalaryRecord>> {
    let Json(request) = payload.map_err(json_rejection)?;

    let mut ledger = state.ledger().lock().await;
    let Some(current) = ledger.records().get(&id) else {
        return Err(PayrollError::RecordNotFound { id }.into());
    };
    let record = request.apply_to(current)?;
    if !ledger.replace_record(&id, record.clone()) {
        return Err(PayrollError::RecordNotFound { id }.into());
    }
    info!(id = %id, "Salary record replaced");
    Ok(Json(record))
}

/// Handler for `POST /records/{id}/release`.
async fn release_hold_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SalaryRecord>> {
    transition_record(&state, id, RecordStatus::Hold, PayrollLedger::release_hold).await
}

/// Handler for `POST /records/{id}/hold`.
async fn hold_record_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SalaryRecord>> {
    transition_record(&state, id, RecordStatus::Pending, PayrollLedger::hold_record).await
}

/// Moves a record out of `expected` using `apply`.
///
/// Unknown ids are 404; a record in any other status is 409.
async fn transition_record(
    state: &AppState,
    id: String,
    expected: RecordStatus,
    apply: fn(&mut PayrollLedger, &str) -> bool,
) -> ApiResult<Json<SalaryRecord>> {
    let mut ledger = state.ledger().lock().await;

    let status = match ledger.records().get(&id) {
        Some(record) => record.status,
        None => return Err(PayrollError::RecordNotFound { id }.into()),
    };
    if status != expected || !apply(&mut *ledger, &id) {
        return Err(ApiErrorResponse::new(
            StatusCode::CONFLICT,
            ApiError::new(
                "INVALID_STATUS",
                format!("Salary record '{}' is {}, expected {}", id, status, expected),
            ),
        ));
    }

    let record = ledger
        .records()
        .get(&id)
        .cloned()
        .ok_or(PayrollError::RecordNotFound { id })?;
    info!(id = %record.id, status = %record.status, "Salary record status changed");
    Ok(Json(record))
}

/// Handler for `GET /summary`.
async fn summary_handler(State(state): State<AppState>) -> Json<PayrollSummary> {
    Json(state.ledger().lock().await.summarize())
}

/// Handler for `GET /config`.
async fn get_config_handler(State(state): State<AppState>) -> Json<PayrollConfig> {
    Json(state.ledger().lock().await.config().clone())
}

/// Handler for `PATCH /config`.
async fn update_config_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConfigUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<PayrollConfig>> {
    let Json(request) = payload.map_err(json_rejection)?;

    let mut ledger = state.ledger().lock().await;
    ledger.update_config(request.key, request.value)?;
    Ok(Json(ledger.config().clone()))
}

/// Handler for `GET /batch`.
async fn batch_progress_handler(State(state): State<AppState>) -> Json<BatchProgress> {
    Json(state.runner().progress().await)
}

/// Handler for `POST /batch`.
///
/// Responds as soon as the run is started; progress is polled via
/// `GET /batch`.
async fn start_batch_handler(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let handle = state.runner().start().await.inspect_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Batch start rejected");
    })?;

    let run_id = handle.run_id();
    info!(correlation_id = %correlation_id, run_id = %run_id, "Batch run accepted");
    let progress = state.runner().progress().await;
    Ok((StatusCode::ACCEPTED, Json(BatchStarted { run_id, progress })))
}

/// Handler for `DELETE /batch`.
async fn cancel_batch_handler(State(state): State<AppState>) -> Json<BatchCancelled> {
    let cancelled = state.runner().cancel().await;
    let progress = state.runner().progress().await;
    Json(BatchCancelled {
        cancelled,
        progress,
    })
}
