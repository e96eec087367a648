//! Shared test helpers for in-memory store integration tests.

use std::sync::Arc;

use docket::task::{
    adapters::memory::InMemoryTaskStore,
    domain::TaskId,
    services::{CreateTaskRequest, TaskService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type exercised by the in-memory integration tests.
pub type TestService = TaskService<InMemoryTaskStore, DefaultClock>;

/// Provides a service over a fresh in-memory store for each test.
#[fixture]
pub fn service() -> TestService {
    TaskService::new(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock))
}

/// Creates a task with a generated description and returns its identifier.
///
/// # Errors
///
/// Returns an error when the service rejects the task.
pub async fn seed_task(service: &TestService, title: &str) -> Result<TaskId, eyre::Report> {
    let ack = service
        .create(CreateTaskRequest::new(
            title,
            format!("Seeded description for {title}"),
        ))
        .await?;
    Ok(ack.task_id())
}
