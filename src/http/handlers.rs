//! HTTP handlers translating requests into task service calls.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use mockable::DefaultClock;
use serde::Deserialize;

use super::{ApiError, Envelope};
use crate::task::{
    domain::Task,
    ports::{InsertAck, TaskPage, TaskStore},
    services::{
        CreateTaskRequest, PageRequest, TaskDeletion, TaskService, TaskServiceError, TaskUpdate,
        UpdateTaskRequest,
    },
};

/// Task service shared by every request.
pub type SharedTaskService = TaskService<dyn TaskStore, DefaultClock>;

/// Shared application dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Task service handling every task route.
    pub tasks: Arc<SharedTaskService>,
}

impl AppState {
    /// Creates state around a store, bounding each operation by `timeout`.
    #[must_use]
    pub fn new(store: Arc<dyn TaskStore>, timeout: Duration) -> Self {
        let service = TaskService::new(store, Arc::new(DefaultClock)).with_timeout(timeout);
        Self {
            tasks: Arc::new(service),
        }
    }
}

/// Body accepted by `POST /api/v1/tasks`; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskBody {
    /// Task title.
    pub title: Option<String>,
    /// Task description.
    pub description: Option<String>,
}

/// Body accepted by `PUT /api/v1/tasks/{task_id}`; absent or `null`
/// fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskBody {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

/// Raw pagination query; values are parsed leniently by [`PageRequest`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Records per page.
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
    /// One-based page number.
    pub page: Option<String>,
    /// Explicit start position overriding the page computation.
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
}

/// `GET /health`
pub async fn health_check() -> Envelope<String> {
    Envelope::message_only(StatusCode::OK, "The application is running successfully")
}

/// `POST /api/v1/tasks`
///
/// # Errors
///
/// 400 for malformed, incomplete or out-of-bounds bodies; 500 when the
/// store rejects the insert; 504 on timeout.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<Envelope<InsertAck>, ApiError> {
    let Json(body) = payload?;
    let request = CreateTaskRequest::from_fields(body.title, body.description)
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    let ack = state
        .tasks
        .create(request)
        .await
        .map_err(|err| ApiError::from_service(&err, "task was not created"))?;

    Ok(Envelope::new(StatusCode::OK, ack).with_message("The task has been created successfully"))
}

/// `GET /api/v1/tasks/{task_id}`
///
/// # Errors
///
/// 404 when no task matches; 500 on store failure; 504 on timeout.
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Envelope<Task>, ApiError> {
    let task = state
        .tasks
        .get(&task_id)
        .await
        .map_err(|err| ApiError::from_service(&err, "error occurred while fetching task"))?;

    Ok(Envelope::new(StatusCode::OK, task))
}

/// `GET /api/v1/tasks?recordPerPage=&page=&startIndex=`
///
/// Answers with the bare `{total_count, total_tasks}` page.
///
/// # Errors
///
/// 503 when the aggregation fails, so callers may retry; 504 on timeout.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<TaskPage>, ApiError> {
    const FAILURE: &str = "error occurred while listing tasks";

    let request = PageRequest::from_query(
        query.record_per_page.as_deref(),
        query.page.as_deref(),
        query.start_index.as_deref(),
    );
    let page = state.tasks.list(request).await.map_err(|err| match err {
        TaskServiceError::Store(_) => ApiError::service_unavailable(FAILURE),
        other => ApiError::from_service(&other, FAILURE),
    })?;

    Ok(Json(page))
}

/// `PUT /api/v1/tasks/{task_id}`
///
/// Always answers explicitly: modified, upserted (data holds the new
/// document id) or unchanged.
///
/// # Errors
///
/// 400 for malformed bodies or out-of-bounds fields; 500 on store failure;
/// 504 on timeout.
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Envelope<String>, ApiError> {
    let Json(body) = payload?;
    let request = UpdateTaskRequest::from_fields(body.title, body.description);

    let update = state
        .tasks
        .update(&task_id, request)
        .await
        .map_err(|err| ApiError::from_service(&err, "error occurred while updating task"))?;

    let envelope = match update {
        TaskUpdate::Modified => Envelope::message_only(
            StatusCode::OK,
            "The task has been successfully updated",
        ),
        TaskUpdate::Upserted(id) => Envelope::new(StatusCode::OK, id.to_string())
            .with_message("The task has been created by upsert"),
        TaskUpdate::Unchanged => {
            Envelope::message_only(StatusCode::OK, "No changes were applied to the task")
        }
    };
    Ok(envelope)
}

/// `DELETE /api/v1/tasks/{task_id}`
///
/// Deleting a missing task is a success reporting nothing to delete.
///
/// # Errors
///
/// 500 on store failure; 504 on timeout.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Envelope<String>, ApiError> {
    let deletion = state.tasks.delete(&task_id).await.map_err(|err| {
        ApiError::from_service(&err, "error occurred while trying to delete the task")
    })?;

    let message = match deletion {
        TaskDeletion::Deleted => "The task was successfully deleted",
        TaskDeletion::NothingToDelete => "No Task to be deleted",
    };
    Ok(Envelope::message_only(StatusCode::OK, message))
}
