//! Store port for task documents.
//!
//! The contract mirrors a document collection: single-document insert,
//! lookup, update and delete filtered by an equality predicate, plus one
//! aggregation used for pagination. Each call is a single atomic store
//! operation.

use crate::task::domain::{DocumentId, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task document collection contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a new task document.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateKey`] when a document with the same
    /// `task_id` already exists, or [`TaskStoreError::Persistence`] when the
    /// store cannot be reached.
    async fn insert(&self, task: &Task) -> TaskStoreResult<InsertAck>;

    /// Finds the first document matching the filter in store order.
    ///
    /// Returns `None` when nothing matches.
    async fn find_one(&self, filter: &TaskFilter) -> TaskStoreResult<Option<Task>>;

    /// Applies a partial update to the first document matching the filter.
    ///
    /// With `upsert` set and no match, a new document is inserted from the
    /// patch under the filtered `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::IncompleteUpsert`] when an insert is required
    /// but the patch does not describe a complete task.
    async fn update_one(
        &self,
        filter: &TaskFilter,
        patch: &TaskPatch,
        upsert: bool,
    ) -> TaskStoreResult<UpdateOutcome>;

    /// Deletes at most one document matching the filter and returns the
    /// number removed.
    async fn delete_one(&self, filter: &TaskFilter) -> TaskStoreResult<u64>;

    /// Runs the aggregation over the whole collection.
    ///
    /// The result holds one grouped [`TaskPage`] per non-empty collection and
    /// nothing at all when the collection is empty.
    async fn aggregate(&self, pipeline: &TaskPipeline) -> TaskStoreResult<Vec<TaskPage>>;
}

/// Equality predicate selecting task documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Matches documents whose `task_id` equals the key.
    TaskId(TaskId),
}

impl TaskFilter {
    /// Builds a filter on the public task identifier.
    #[must_use]
    pub const fn by_task_id(task_id: TaskId) -> Self {
        Self::TaskId(task_id)
    }

    /// Returns `true` when the task satisfies the predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::TaskId(task_id) => task.task_id() == task_id,
        }
    }

    /// Returns the filtered task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        match self {
            Self::TaskId(task_id) => task_id,
        }
    }
}

/// Aggregation that groups the collection into one bucket, counts it and
/// slices the bucket to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPipeline {
    start_index: u64,
    limit: u64,
}

impl TaskPipeline {
    /// Builds the count-and-slice pipeline for the window
    /// `[start_index, start_index + limit)`.
    #[must_use]
    pub const fn count_and_slice(start_index: u64, limit: u64) -> Self {
        Self { start_index, limit }
    }

    /// Returns the first position of the window.
    #[must_use]
    pub const fn start_index(self) -> u64 {
        self.start_index
    }

    /// Returns the maximum number of documents in the window.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }
}

/// Grouped aggregation result: the collection size and one window of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPage {
    /// Number of documents in the collection.
    pub total_count: u64,
    /// Documents inside the requested window, in store order.
    pub total_tasks: Vec<Task>,
}

impl TaskPage {
    /// Returns the page reported for an empty collection.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_count: 0,
            total_tasks: Vec::new(),
        }
    }
}

/// Acknowledgment of a successful insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsertAck {
    /// Identifier of the inserted document.
    #[serde(rename = "InsertedID")]
    pub inserted_id: DocumentId,
}

impl InsertAck {
    /// Returns the public task identifier of the inserted document.
    #[must_use]
    pub fn task_id(&self) -> TaskId {
        self.inserted_id.to_task_id()
    }
}

/// Counts reported by [`TaskStore::update_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents matched by the filter.
    pub matched_count: u64,
    /// Documents whose stored values changed.
    pub modified_count: u64,
    /// Identifier of the document inserted by an upsert, if any.
    pub upserted_id: Option<DocumentId>,
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A document with the same public identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateKey(TaskId),

    /// An upsert would insert a document missing required fields.
    #[error("cannot upsert incomplete task document: {0}")]
    IncompleteUpsert(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
