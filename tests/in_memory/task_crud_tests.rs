//! In-memory integration tests for task create, read, update and delete.

use super::helpers::{TestService, seed_task, service};
use docket::task::services::{
    CreateTaskRequest, TaskDeletion, TaskServiceError, TaskUpdate, UpdateTaskRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_fetched_by_its_task_id(service: TestService) -> Result<(), eyre::Report> {
    let ack = service
        .create(CreateTaskRequest::new("Book venue", "Reserve the hall for May"))
        .await?;

    let task = service.get(ack.task_id().as_str()).await?;

    eyre::ensure!(task.id() == ack.inserted_id, "document id mismatch");
    eyre::ensure!(
        task.task_id().as_str() == ack.inserted_id.to_string(),
        "task_id should mirror the document id"
    );
    eyre::ensure!(task.title().as_str() == "Book venue", "title mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_create_leaves_the_store_empty(service: TestService) -> Result<(), eyre::Report> {
    let result = service
        .create(CreateTaskRequest::new("A", "Title is one character"))
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskServiceError::Domain(_))),
        "expected a validation error, got {result:?}"
    );
    let page = service.list(Default::default()).await?;
    eyre::ensure!(page.total_count == 0, "no task should be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_keeps_unspecified_fields(service: TestService) -> Result<(), eyre::Report> {
    let task_id = seed_task(&service, "Original").await?;
    let before = service.get(task_id.as_str()).await?;

    let update = service
        .update(
            task_id.as_str(),
            UpdateTaskRequest::new().with_description("Rewritten description"),
        )
        .await?;
    let after = service.get(task_id.as_str()).await?;

    eyre::ensure!(update == TaskUpdate::Modified, "expected a modification");
    eyre::ensure!(after.title() == before.title(), "title should be kept");
    eyre::ensure!(
        after.description().as_str() == "Rewritten description",
        "description should change"
    );
    eyre::ensure!(
        after.created_at() == before.created_at(),
        "created_at must not change"
    );
    eyre::ensure!(
        after.updated_at() >= before.updated_at(),
        "updated_at must not move backwards"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_update_of_unknown_id_creates_the_task(
    service: TestService,
) -> Result<(), eyre::Report> {
    let update = service
        .update(
            "legacy-17",
            UpdateTaskRequest::new()
                .with_title("Legacy import")
                .with_description("Migrated from the old tracker"),
        )
        .await?;

    let TaskUpdate::Upserted(id) = update else {
        return Err(eyre::eyre!("expected an upsert, got {update:?}"));
    };
    let task = service.get("legacy-17").await?;
    eyre::ensure!(task.id() == id, "upserted id mismatch");

    let second = service
        .update(
            "legacy-17",
            UpdateTaskRequest::new().with_title("Legacy import, revised"),
        )
        .await?;
    eyre::ensure!(second == TaskUpdate::Modified, "second update should modify");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_is_idempotent_from_the_callers_view(
    service: TestService,
) -> Result<(), eyre::Report> {
    let task_id = seed_task(&service, "Short lived").await?;

    let first = service.delete(task_id.as_str()).await?;
    let second = service.delete(task_id.as_str()).await?;
    let lookup = service.get(task_id.as_str()).await;

    eyre::ensure!(first == TaskDeletion::Deleted, "first delete should remove");
    eyre::ensure!(
        second == TaskDeletion::NothingToDelete,
        "second delete should find nothing"
    );
    eyre::ensure!(
        matches!(lookup, Err(TaskServiceError::NotFound(_))),
        "deleted task should not be found"
    );
    Ok(())
}
