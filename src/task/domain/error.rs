//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A field required on creation was not supplied.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The task title length is outside its bounds.
    #[error("title must be between {min} and {max} characters, got {actual}")]
    InvalidTitleLength {
        /// Supplied length in characters.
        actual: usize,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },

    /// The task description length is outside its bounds.
    #[error("description must be between {min} and {max} characters, got {actual}")]
    InvalidDescriptionLength {
        /// Supplied length in characters.
        actual: usize,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },

    /// The public task identifier is empty.
    #[error("task_id must not be empty")]
    EmptyTaskId,
}
