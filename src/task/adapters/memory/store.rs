//! In-memory task store for tests and single-process deployments.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{DocumentId, Task, TaskPatch},
    ports::{
        InsertAck, TaskFilter, TaskPage, TaskPipeline, TaskStore, TaskStoreError,
        TaskStoreResult, UpdateOutcome,
    },
};

/// Thread-safe in-memory task store.
///
/// Documents are kept in insertion order, which is the store order observed
/// by lookups and pagination.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    documents: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, Vec<Task>>> {
        self.documents.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, Vec<Task>>> {
        self.documents.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Converts a collection position to the `u64` counts the port reports.
fn to_count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<InsertAck> {
        let mut documents = self.write()?;
        if documents
            .iter()
            .any(|stored| stored.task_id() == task.task_id() || stored.id() == task.id())
        {
            return Err(TaskStoreError::DuplicateKey(task.task_id().clone()));
        }
        documents.push(task.clone());
        Ok(InsertAck {
            inserted_id: task.id(),
        })
    }

    async fn find_one(&self, filter: &TaskFilter) -> TaskStoreResult<Option<Task>> {
        let documents = self.read()?;
        Ok(documents.iter().find(|task| filter.matches(task)).cloned())
    }

    async fn update_one(
        &self,
        filter: &TaskFilter,
        patch: &TaskPatch,
        upsert: bool,
    ) -> TaskStoreResult<UpdateOutcome> {
        let mut documents = self.write()?;

        if let Some(task) = documents.iter_mut().find(|task| filter.matches(task)) {
            let modified = task.apply(patch);
            return Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome::default());
        }

        let task_id = filter.task_id().clone();
        let id = DocumentId::new();
        let task = Task::from_upsert(id, task_id.clone(), patch)
            .ok_or(TaskStoreError::IncompleteUpsert(task_id))?;
        documents.push(task);
        Ok(UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
        })
    }

    async fn delete_one(&self, filter: &TaskFilter) -> TaskStoreResult<u64> {
        let mut documents = self.write()?;
        let position = documents.iter().position(|task| filter.matches(task));
        Ok(position.map_or(0, |index| {
            documents.remove(index);
            1
        }))
    }

    async fn aggregate(&self, pipeline: &TaskPipeline) -> TaskStoreResult<Vec<TaskPage>> {
        let documents = self.read()?;
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let start = usize::try_from(pipeline.start_index()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pipeline.limit()).unwrap_or(usize::MAX);
        let total_tasks = documents.iter().skip(start).take(limit).cloned().collect();
        Ok(vec![TaskPage {
            total_count: to_count(documents.len()),
            total_tasks,
        }])
    }
}
