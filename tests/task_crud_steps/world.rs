//! Shared world state for task CRUD BDD scenarios.

use std::sync::Arc;

use docket::task::{
    adapters::memory::InMemoryTaskStore,
    domain::TaskId,
    ports::TaskPage,
    services::{TaskDeletion, TaskService, TaskServiceError, TaskUpdate},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskStore, DefaultClock>;

/// Scenario world for task CRUD behaviour tests.
pub struct TaskCrudWorld {
    pub service: TestTaskService,
    pub stored_ids: Vec<TaskId>,
    pub last_create: Option<Result<TaskId, TaskServiceError>>,
    pub deletions: Vec<TaskDeletion>,
    pub last_page: Option<TaskPage>,
    pub last_update: Option<TaskUpdate>,
}

impl TaskCrudWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskService::new(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock)),
            stored_ids: Vec::new(),
            last_create: None,
            deletions: Vec::new(),
            last_page: None,
            last_update: None,
        }
    }
}

impl Default for TaskCrudWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskCrudWorld {
    TaskCrudWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
