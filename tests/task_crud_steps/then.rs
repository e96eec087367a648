//! Then steps for task CRUD BDD scenarios.

use super::world::{TaskCrudWorld, run_async};
use docket::task::{
    domain::TaskId,
    services::{PageRequest, TaskDeletion, TaskServiceError, TaskUpdate},
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

fn created_task_id(world: &TaskCrudWorld) -> Result<TaskId, eyre::Report> {
    match world.last_create.as_ref() {
        Some(Ok(task_id)) => Ok(task_id.clone()),
        Some(Err(err)) => Err(eyre::eyre!("task creation failed: {err}")),
        None => Err(eyre::eyre!("missing create result in scenario world")),
    }
}

fn ensure_title(world: &TaskCrudWorld, task_id: &str, title: &str) -> Result<(), eyre::Report> {
    let task = run_async(world.service.get(task_id)).wrap_err("fetch task")?;
    eyre::ensure!(
        task.title().as_str() == title,
        "expected title {title}, found {}",
        task.title().as_str()
    );
    Ok(())
}

#[then(r#"fetching the created task returns title "{title}""#)]
fn created_task_has_title(world: &TaskCrudWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = created_task_id(world)?;
    ensure_title(world, task_id.as_str(), &title)
}

#[then("the created task has matching timestamps")]
fn created_task_has_matching_timestamps(world: &TaskCrudWorld) -> Result<(), eyre::Report> {
    let task_id = created_task_id(world)?;
    let task = run_async(world.service.get(task_id.as_str())).wrap_err("fetch task")?;
    eyre::ensure!(
        task.created_at() == task.updated_at(),
        "created_at and updated_at should match on creation"
    );
    Ok(())
}

#[then("the request is rejected as invalid")]
fn request_rejected_as_invalid(world: &TaskCrudWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result"))?;
    if !matches!(result, Err(TaskServiceError::Domain(_))) {
        return Err(eyre::eyre!("expected a validation error, got {result:?}"));
    }
    Ok(())
}

#[then("the store holds {count:u64} tasks")]
fn store_holds(world: &TaskCrudWorld, count: u64) -> Result<(), eyre::Report> {
    let page = run_async(world.service.list(PageRequest::default())).wrap_err("list tasks")?;
    eyre::ensure!(
        page.total_count == count,
        "expected {count} tasks, found {}",
        page.total_count
    );
    Ok(())
}

#[then("the first delete removed the task")]
fn first_delete_removed(world: &TaskCrudWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.deletions.first() == Some(&TaskDeletion::Deleted),
        "expected the first delete to remove the task, got {:?}",
        world.deletions
    );
    Ok(())
}

#[then("the second delete found nothing to delete")]
fn second_delete_found_nothing(world: &TaskCrudWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.deletions.get(1) == Some(&TaskDeletion::NothingToDelete),
        "expected the second delete to find nothing, got {:?}",
        world.deletions
    );
    Ok(())
}

#[then("the listing reports a total of {total:u64} tasks")]
fn listing_total(world: &TaskCrudWorld, total: u64) -> Result<(), eyre::Report> {
    let page = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing in scenario world"))?;
    eyre::ensure!(
        page.total_count == total,
        "expected total {total}, found {}",
        page.total_count
    );
    Ok(())
}

#[then("the listing holds tasks {first:usize} through {last:usize}")]
fn listing_holds_range(
    world: &TaskCrudWorld,
    first: usize,
    last: usize,
) -> Result<(), eyre::Report> {
    let page = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing in scenario world"))?;
    let expected = world
        .stored_ids
        .get(first.saturating_sub(1)..last)
        .ok_or_else(|| eyre::eyre!("range {first}..={last} outside stored tasks"))?;
    let listed: Vec<TaskId> = page
        .total_tasks
        .iter()
        .map(|task| task.task_id().clone())
        .collect();
    eyre::ensure!(listed == expected, "listed tasks do not match {first}..={last}");
    Ok(())
}

#[then("the update created the task by upsert")]
fn update_upserted(world: &TaskCrudWorld) -> Result<(), eyre::Report> {
    match world.last_update {
        Some(TaskUpdate::Upserted(_)) => Ok(()),
        other => Err(eyre::eyre!("expected an upsert, got {other:?}")),
    }
}

#[then(r#"fetching task "{task_id}" returns title "{title}""#)]
fn task_has_title(
    world: &TaskCrudWorld,
    task_id: String,
    title: String,
) -> Result<(), eyre::Report> {
    ensure_title(world, &task_id, &title)
}
