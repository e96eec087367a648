//! Given steps for task CRUD BDD scenarios.

use super::world::{TaskCrudWorld, run_async};
use docket::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn store_task(world: &mut TaskCrudWorld, title: &str) -> Result<(), eyre::Report> {
    let ack = run_async(world.service.create(CreateTaskRequest::new(
        title,
        format!("Scenario task {title}"),
    )))
    .wrap_err("store task for scenario setup")?;
    world.stored_ids.push(ack.task_id());
    Ok(())
}

#[given("an empty task store")]
fn empty_task_store(world: &mut TaskCrudWorld) -> Result<(), eyre::Report> {
    let page = run_async(world.service.list(Default::default()))
        .wrap_err("list tasks for scenario setup")?;
    eyre::ensure!(page.total_count == 0, "store should start empty");
    Ok(())
}

#[given(r#"a stored task titled "{title}""#)]
fn stored_task(world: &mut TaskCrudWorld, title: String) -> Result<(), eyre::Report> {
    store_task(world, &title)
}

#[given("{count:u64} stored tasks")]
fn many_stored_tasks(world: &mut TaskCrudWorld, count: u64) -> Result<(), eyre::Report> {
    for index in 1..=count {
        store_task(world, &format!("Task {index}"))?;
    }
    Ok(())
}
