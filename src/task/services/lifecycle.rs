//! Service layer for task creation, lookup, listing, update and deletion.

use super::PageRequest;
use crate::task::{
    domain::{DocumentId, Task, TaskDescription, TaskDomainError, TaskId, TaskPatch, TaskTitle},
    ports::{InsertAck, TaskFilter, TaskPage, TaskStore, TaskStoreError, TaskStoreResult},
};
use mockable::Clock;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Time each store call may take before it is cancelled.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(100);

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
}

impl CreateTaskRequest {
    /// Creates a request with both required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Creates a request from optionally supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingField`] naming the first absent
    /// field.
    pub fn from_fields(
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self, TaskDomainError> {
        let title = title.ok_or(TaskDomainError::MissingField("title"))?;
        let description = description.ok_or(TaskDomainError::MissingField("description"))?;
        Ok(Self { title, description })
    }
}

/// Request payload for a partial task update.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing but the update timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Creates a request from optionally supplied fields.
    #[must_use]
    pub const fn from_fields(title: Option<String>, description: Option<String>) -> Self {
        Self { title, description }
    }
}

/// Result of an update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskUpdate {
    /// An existing task was changed.
    Modified,
    /// No task matched and a new one was inserted.
    Upserted(DocumentId),
    /// Nothing was written.
    Unchanged,
}

/// Result of a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDeletion {
    /// The task was removed.
    Deleted,
    /// No task matched.
    NothingToDelete,
}

/// Service operation names used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOperation {
    /// Task creation.
    Create,
    /// Lookup by task identifier.
    Get,
    /// Paginated listing.
    List,
    /// Partial update.
    Update,
    /// Deletion.
    Delete,
}

impl TaskOperation {
    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::List => "list",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// No task matched the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// Store operation did not finish in time and was cancelled.
    #[error("{operation} operation timed out after {after:?}")]
    Timeout {
        /// Operation that timed out.
        operation: TaskOperation,
        /// Configured bound.
        after: Duration,
    },
}

impl TaskServiceError {
    /// Returns `true` when repeating the call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Store(TaskStoreError::Persistence(_))
        )
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Every store call is bounded by the configured timeout; on expiry the
/// in-flight call is dropped and [`TaskServiceError::Timeout`] returned.
pub struct TaskService<S, C>
where
    S: TaskStore + ?Sized,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    timeout: Duration,
}

impl<S, C> TaskService<S, C>
where
    S: TaskStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service with [`DEFAULT_OPERATION_TIMEOUT`].
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Replaces the per-operation timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the per-operation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title or description is
    /// out of bounds, without touching the store. Store failures and
    /// timeouts are returned as-is and never retried.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<InsertAck> {
        let title = TaskTitle::new(request.title)?;
        let description = TaskDescription::new(request.description)?;
        let task = Task::new(title, description, &*self.clock);

        let ack = self
            .bounded(TaskOperation::Create, self.store.insert(&task))
            .await?;
        tracing::debug!(task_id = %task.task_id(), "task created");
        Ok(ack)
    }

    /// Fetches a task by its public identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task matches.
    pub async fn get(&self, task_id: &str) -> TaskServiceResult<Task> {
        let task_id = TaskId::new(task_id)?;
        let filter = TaskFilter::by_task_id(task_id.clone());

        self.bounded(TaskOperation::Get, self.store.find_one(&filter))
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))
    }

    /// Returns the total task count and one window of tasks.
    ///
    /// A window past the end yields fewer, possibly zero, tasks. An empty
    /// collection yields a zero count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] or [`TaskServiceError::Timeout`]
    /// when the aggregation fails; both are retryable.
    pub async fn list(&self, request: PageRequest) -> TaskServiceResult<TaskPage> {
        let pipeline = request.pipeline();
        let pages = self
            .bounded(TaskOperation::List, self.store.aggregate(&pipeline))
            .await?;
        let page = pages.into_iter().next().unwrap_or_else(TaskPage::empty);
        tracing::debug!(
            total_count = page.total_count,
            returned = page.total_tasks.len(),
            start_index = pipeline.start_index(),
            "tasks listed"
        );
        Ok(page)
    }

    /// Applies a partial update to the task with the given identifier.
    ///
    /// Only supplied fields change and `updated_at` is refreshed;
    /// `created_at` is preserved. When the request carries a complete task
    /// and nothing matches, the task is inserted under `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when a supplied field is out of
    /// bounds.
    pub async fn update(
        &self,
        task_id: &str,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<TaskUpdate> {
        let task_id = TaskId::new(task_id)?;
        let mut patch = TaskPatch::new(&*self.clock);
        if let Some(title) = request.title {
            patch = patch.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = request.description {
            patch = patch.with_description(TaskDescription::new(description)?);
        }

        let filter = TaskFilter::by_task_id(task_id.clone());
        let upsert = patch.is_complete();
        let outcome = self
            .bounded(
                TaskOperation::Update,
                self.store.update_one(&filter, &patch, upsert),
            )
            .await?;

        let update = if outcome.modified_count > 0 {
            TaskUpdate::Modified
        } else if let Some(id) = outcome.upserted_id {
            TaskUpdate::Upserted(id)
        } else {
            TaskUpdate::Unchanged
        };
        tracing::debug!(task_id = %task_id, ?update, "task update applied");
        Ok(update)
    }

    /// Deletes at most one task with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] or [`TaskServiceError::Timeout`]
    /// when the store call fails.
    pub async fn delete(&self, task_id: &str) -> TaskServiceResult<TaskDeletion> {
        let task_id = TaskId::new(task_id)?;
        let filter = TaskFilter::by_task_id(task_id.clone());
        let deleted = self
            .bounded(TaskOperation::Delete, self.store.delete_one(&filter))
            .await?;

        let deletion = if deleted > 0 {
            TaskDeletion::Deleted
        } else {
            TaskDeletion::NothingToDelete
        };
        tracing::debug!(task_id = %task_id, ?deletion, "task delete applied");
        Ok(deletion)
    }

    async fn bounded<T>(
        &self,
        operation: TaskOperation,
        call: impl Future<Output = TaskStoreResult<T>>,
    ) -> TaskServiceResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                tracing::error!(%operation, error = %err, "task store operation failed");
                Err(TaskServiceError::Store(err))
            }
            Err(_elapsed) => {
                tracing::warn!(%operation, timeout = ?self.timeout, "task store operation timed out");
                Err(TaskServiceError::Timeout {
                    operation,
                    after: self.timeout,
                })
            }
        }
    }
}
