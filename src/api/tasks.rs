//! Task CRUD and CSV bulk-import handlers.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::store::{NewTask, StoreError, TABLE_TASKS};

use super::routes::AppState;
use super::types::{CreateTaskRequest, ErrorResponse, ImportResponse, OkResponse, UpdateTaskRequest};
use super::validation;

/// MIME types accepted for CSV uploads.
const CSV_MIME_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];

fn ok<T: Serialize>(code: StatusCode, details: T) -> Response {
    (code, Json(OkResponse::new(details))).into_response()
}

fn error(code: StatusCode, message: impl Into<String>) -> Response {
    (
        code,
        Json(ErrorResponse {
            status: "Error",
            message: message.into(),
        }),
    )
        .into_response()
}

/// 422 listing every violated validation rule.
fn validation_failure(details: Vec<&'static str>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "error": true, "details": details })),
    )
        .into_response()
}

/// 400 for a path id that is not a UUID. Rejected before the store is
/// consulted.
fn invalid_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": true, "details": "INVALID_ID" })),
    )
        .into_response()
}

/// 400 for a missing or non-CSV upload.
fn csv_rejected(details: &'static str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "status": "Error", "details": details })),
    )
        .into_response()
}

fn internal(e: StoreError) -> Response {
    tracing::error!("Store operation failed: {}", e);
    error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn parse_task_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// Reject an upload field unless it is named `file` and carries a CSV
/// MIME type. Returns the rejection code, or `None` when acceptable.
fn csv_field_rejection(name: Option<&str>, content_type: Option<&str>) -> Option<&'static str> {
    if name != Some("file") {
        return Some("CSV_FILE_REQUIRED");
    }
    if !content_type.is_some_and(|mime| CSV_MIME_TYPES.contains(&mime)) {
        return Some("CSV_FILE_INVALID_FORMAT");
    }
    None
}

/// `GET /tasks`
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Response {
    let tasks = state.store.list(TABLE_TASKS).await;
    ok(StatusCode::OK, tasks)
}

/// `POST /tasks`
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskRequest>,
) -> Response {
    let fields = match validation::validate_create(body) {
        Ok(fields) => fields,
        Err(errors) => return validation_failure(errors),
    };

    match state.store.create(TABLE_TASKS, fields).await {
        Ok(task) => ok(StatusCode::CREATED, task),
        Err(e) => internal(e),
    }
}

fn csv_reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes)
}

/// `POST /tasks/create-many`
///
/// Expects one multipart file field containing CSV with `title` and
/// `description` columns. Rows are committed one by one as they parse;
/// a failure partway through leaves the earlier rows in place.
pub async fn create_many_tasks(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => return csv_rejected("CSV_FILE_REQUIRED"),
        Err(e) => return error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let name = field.name().map(|s| s.to_string());
    let content_type = field.content_type().map(|s| s.to_string());
    if let Some(details) = csv_field_rejection(name.as_deref(), content_type.as_deref()) {
        return csv_rejected(details);
    }

    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let mut reader = csv_reader(&bytes);
    let mut imported = 0usize;

    for record in reader.deserialize::<NewTask>() {
        let fields = match record {
            Ok(fields) => fields,
            Err(e) => {
                tracing::error!("CSV parse failed after {} rows: {}", imported, e);
                return error(StatusCode::INTERNAL_SERVER_ERROR, "ERROR_PARSING_CSV_FILE");
            }
        };

        if let Err(e) = state.store.create(TABLE_TASKS, fields).await {
            return internal(e);
        }
        imported += 1;
    }

    tracing::info!("Imported {} tasks from CSV upload", imported);
    (
        StatusCode::CREATED,
        Json(ImportResponse {
            status: "Ok",
            message: "IMPORTED_SUCCESSFULLY",
            imported,
        }),
    )
        .into_response()
}

/// `PUT /tasks/{id}`
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<UpdateTaskRequest>>,
) -> Response {
    let Some(id) = parse_task_id(&id) else {
        return invalid_id();
    };

    let body = body.map(|Json(b)| b).unwrap_or_default();
    let patch = match validation::validate_update(body) {
        Ok(patch) => patch,
        Err(errors) => return validation_failure(errors),
    };

    match state.store.update(TABLE_TASKS, id, patch).await {
        Ok(Some(task)) => ok(StatusCode::OK, task),
        Ok(None) => error(StatusCode::NOT_FOUND, "TASK_NOT_FOUND"),
        Err(e) => internal(e),
    }
}

/// `PATCH /tasks/{id}/completed`
pub async fn toggle_completed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_task_id(&id) else {
        return invalid_id();
    };

    match state.store.toggle_completed(TABLE_TASKS, id).await {
        Ok(Some(task)) => ok(StatusCode::OK, task),
        Ok(None) => error(StatusCode::NOT_FOUND, "TASK_NOT_FOUND"),
        Err(e) => internal(e),
    }
}

/// `DELETE /tasks/{id}`
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_task_id(&id) else {
        return invalid_id();
    };

    match state.store.remove(TABLE_TASKS, id).await {
        // A one-element list, as the delete response carries the
        // removed records.
        Ok(Some(task)) => ok(StatusCode::OK, vec![task]),
        Ok(None) => error(StatusCode::NOT_FOUND, "TASK_NOT_FOUND"),
        Err(e) => internal(e),
    }
}
