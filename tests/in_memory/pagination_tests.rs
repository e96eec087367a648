//! In-memory integration tests for paginated listing.

use super::helpers::{TestService, seed_task, service};
use docket::task::{domain::TaskId, services::PageRequest};
use rstest::rstest;

async fn seed_many(service: &TestService, count: usize) -> Result<Vec<TaskId>, eyre::Report> {
    let mut ids = Vec::with_capacity(count);
    for index in 1..=count {
        ids.push(seed_task(service, &format!("Task {index}")).await?);
    }
    Ok(ids)
}

#[rstest]
#[case(10, 1, 0..10)]
#[case(10, 2, 10..20)]
#[case(10, 3, 20..25)]
#[case(7, 4, 21..25)]
#[case(10, 4, 25..25)]
#[tokio::test(flavor = "multi_thread")]
async fn pages_cover_the_collection_in_store_order(
    service: TestService,
    #[case] record_per_page: i64,
    #[case] page: i64,
    #[case] expected: std::ops::Range<usize>,
) -> Result<(), eyre::Report> {
    let ids = seed_many(&service, 25).await?;

    let listed = service
        .list(PageRequest::new(record_per_page, page))
        .await?;

    let listed_ids: Vec<TaskId> = listed
        .total_tasks
        .iter()
        .map(|task| task.task_id().clone())
        .collect();
    let expected_ids = ids
        .get(expected)
        .ok_or_else(|| eyre::eyre!("expected window out of range"))?;
    eyre::ensure!(listed.total_count == 25, "total count should cover all tasks");
    eyre::ensure!(listed_ids == expected_ids, "window mismatch: {listed_ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn start_index_overrides_page_number(service: TestService) -> Result<(), eyre::Report> {
    let ids = seed_many(&service, 6).await?;

    let listed = service
        .list(PageRequest::new(2, 1).with_start_index(3))
        .await?;

    let first = listed
        .total_tasks
        .first()
        .ok_or_else(|| eyre::eyre!("expected a task in the window"))?;
    eyre::ensure!(listed.total_tasks.len() == 2, "window size mismatch");
    eyre::ensure!(Some(first.task_id()) == ids.get(3), "window should start at 3");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_collection_lists_nothing(service: TestService) -> Result<(), eyre::Report> {
    let listed = service.list(PageRequest::default()).await?;

    eyre::ensure!(listed.total_count == 0, "count should be zero");
    eyre::ensure!(listed.total_tasks.is_empty(), "no tasks expected");
    Ok(())
}
