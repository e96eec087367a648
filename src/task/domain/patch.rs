//! Partial update document for tasks.

use super::{TaskDescription, TaskTitle, task::stored_timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Field-presence driven partial update.
///
/// Only fields set on the patch are written; `updated_at` is always
/// refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<TaskDescription>,
    updated_at: DateTime<Utc>,
}

impl TaskPatch {
    /// Creates an empty patch stamped with the current clock time.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            title: None,
            description: None,
            updated_at: stored_timestamp(clock),
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Returns the replacement title, if any.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the replacement description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the refreshed update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the patch carries every field of a task, so an
    /// upsert can materialise a complete document from it.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.title.is_some() && self.description.is_some()
    }
}
