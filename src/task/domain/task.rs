//! Task aggregate root.

use super::{DocumentId, TaskDescription, TaskId, TaskPatch, TaskTitle};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: DocumentId,
    task_id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted document identifier.
    pub id: DocumentId,
    /// Persisted public task identifier.
    pub task_id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a fresh identifier.
    ///
    /// The public `task_id` mirrors the document identifier and both
    /// timestamps are set to the same instant.
    #[must_use]
    pub fn new(title: TaskTitle, description: TaskDescription, clock: &impl Clock) -> Self {
        let id = DocumentId::new();
        let timestamp = stored_timestamp(clock);
        Self {
            id,
            task_id: id.to_task_id(),
            title,
            description,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Materialises the document an upserting update inserts when no task
    /// matches `task_id`.
    ///
    /// Returns `None` when the patch lacks a title or description.
    #[must_use]
    pub fn from_upsert(id: DocumentId, task_id: TaskId, patch: &TaskPatch) -> Option<Self> {
        let title = patch.title()?.clone();
        let description = patch.description()?.clone();
        Some(Self {
            id,
            task_id,
            title,
            description,
            created_at: patch.updated_at(),
            updated_at: patch.updated_at(),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            title: data.title,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the public task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update, leaving absent fields untouched.
    ///
    /// `created_at` is never rewritten. Returns `true` when any stored value
    /// changed.
    pub fn apply(&mut self, patch: &TaskPatch) -> bool {
        let mut changed = false;
        if let Some(title) = patch.title()
            && *title != self.title
        {
            self.title = title.clone();
            changed = true;
        }
        if let Some(description) = patch.description()
            && *description != self.description
        {
            self.description = description.clone();
            changed = true;
        }
        if patch.updated_at() != self.updated_at {
            self.updated_at = patch.updated_at();
            changed = true;
        }
        changed
    }
}

/// Reads the clock at the precision the stores persist (microseconds).
pub(super) fn stored_timestamp(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}
