//! When steps for task CRUD BDD scenarios.

use super::world::{TaskCrudWorld, run_async};
use docket::task::services::{CreateTaskRequest, PageRequest, UpdateTaskRequest};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"a task titled "{title}" described as "{description}" is created"#)]
fn create_task(world: &mut TaskCrudWorld, title: String, description: String) {
    let result = run_async(
        world
            .service
            .create(CreateTaskRequest::new(title, description)),
    );
    world.last_create = Some(result.map(|ack| ack.task_id()));
}

fn delete_stored_task(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .stored_ids
        .first()
        .cloned()
        .ok_or_else(|| eyre::eyre!("missing stored task in scenario world"))?;
    let deletion = run_async(world.service.delete(task_id.as_str()))
        .wrap_err("delete stored task")?;
    world.deletions.push(deletion);
    Ok(())
}

#[when("the stored task is deleted")]
fn delete_task(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    delete_stored_task(world)
}

#[when("the stored task is deleted again")]
fn delete_task_again(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    delete_stored_task(world)
}

#[when("page {page:i64} is listed with {record_per_page:i64} records per page")]
fn list_page(
    world: &mut TaskCrudWorld,
    page: i64,
    record_per_page: i64,
) -> Result<(), eyre::Report> {
    let listed = run_async(
        world
            .service
            .list(PageRequest::new(record_per_page, page)),
    )
    .wrap_err("list tasks")?;
    world.last_page = Some(listed);
    Ok(())
}

#[when(r#"task "{task_id}" is updated with title "{title}" and description "{description}""#)]
fn update_task(
    world: &mut TaskCrudWorld,
    task_id: String,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let request = UpdateTaskRequest::new()
        .with_title(title)
        .with_description(description);
    let update = run_async(world.service.update(&task_id, request)).wrap_err("update task")?;
    world.last_update = Some(update);
    Ok(())
}
