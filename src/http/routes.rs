//! Route table for the HTTP surface.

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_task, delete_task, get_task, health_check, list_tasks, update_task,
};
use crate::task::domain::{TaskDescription, TaskTitle};

/// Collection path of the task resource.
pub const TASKS_PATH: &str = "/api/v1/tasks";

/// Largest accepted request body in bytes.
///
/// Sized so that a title and description at their character limits still
/// fit when every character is sent as a `\uXXXX\uXXXX` surrogate-pair
/// escape, with room left for the JSON framing.
pub const MAX_BODY_BYTES: usize =
    (TaskTitle::MAX_CHARS + TaskDescription::MAX_CHARS) * 12 + 64 * 1024;

/// Builds the application router with request tracing and a body limit
/// of [`MAX_BODY_BYTES`].
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(TASKS_PATH, get(list_tasks).post(create_task))
        .route(
            "/api/v1/tasks/{task_id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
