//! Request handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use formkit_core::{FormError, FormResult};
use formkit_forms::Record;
use formkit_store::Submission;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::params::{parse_id, ExportQuery, ListQuery};
use crate::state::AppState;

/// Ids start at 1, so 0 never names a submission.
const UNASSIGNED_ID: u64 = 0;

/// Body returned after a successful create or update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub success: bool,
    pub id: u64,
    pub created_at: String,
}

impl From<&Submission> for SubmissionReceipt {
    fn from(submission: &Submission) -> Self {
        Self {
            success: true,
            id: submission.id,
            created_at: submission.created_at_string(),
        }
    }
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// `GET /api/form-schema`
pub async fn form_schema(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store().schema().clone())
}

/// `POST /api/submissions`
pub async fn create_submission(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let record = parse_record(&body)?;
    let submission = state.store().submit(record)?;
    Ok((
        StatusCode::CREATED,
        Json(SubmissionReceipt::from(&submission)),
    ))
}

/// `GET /api/submissions`
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let params = query.into_params()?;
    let page = state.store().list(&params)?;
    Ok(Json(page))
}

/// `GET /api/submissions/export`
pub async fn export_submissions(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let (format, params) = query.into_parts()?;
    let exporter = format.exporter();
    let document = state.store().export(format, &params)?;
    let disposition = format!(
        "attachment; filename=\"submissions.{}\"",
        exporter.file_extension()
    );
    Ok((
        [
            (header::CONTENT_TYPE, exporter.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    ))
}

/// `GET /api/submissions/{id}`
pub async fn get_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&raw_id).ok_or_else(FormError::submission_not_found)?;
    Ok(Json(state.store().get(id)?))
}

/// `PUT /api/submissions/{id}`
pub async fn update_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let record = parse_record(&body)?;
    // Unreadable ids still go through the store so validation is reported first.
    let submission = state
        .store()
        .update(parse_id(&raw_id).unwrap_or(UNASSIGNED_ID), record)?;
    Ok(Json(SubmissionReceipt::from(&submission)))
}

/// `DELETE /api/submissions/{id}`
pub async fn delete_submission(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&raw_id).ok_or_else(FormError::submission_not_found)?;
    state.store().delete(id)?;
    Ok(Json(json!({"success": true})))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"})))
}

fn parse_record(body: &[u8]) -> FormResult<Record> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err(FormError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        Err(e) => Err(FormError::BadRequest(format!("Invalid JSON body: {e}"))),
    }
}
