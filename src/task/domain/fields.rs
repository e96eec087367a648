//! Length-bounded text fields carried by a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task title, between 2 and 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Minimum title length in characters.
    pub const MIN_CHARS: usize = 2;
    /// Maximum title length in characters.
    pub const MAX_CHARS: usize = 100;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitleLength`] when the character
    /// count falls outside [`Self::MIN_CHARS`]..=[`Self::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let value = value.into();
        let actual = value.chars().count();
        if !(Self::MIN_CHARS..=Self::MAX_CHARS).contains(&actual) {
            return Err(TaskDomainError::InvalidTitleLength {
                actual,
                min: Self::MIN_CHARS,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task description, between 2 and 900000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Minimum description length in characters.
    pub const MIN_CHARS: usize = 2;
    /// Maximum description length in characters.
    pub const MAX_CHARS: usize = 900_000;

    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDescriptionLength`] when the
    /// character count falls outside
    /// [`Self::MIN_CHARS`]..=[`Self::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let value = value.into();
        let actual = value.chars().count();
        if !(Self::MIN_CHARS..=Self::MAX_CHARS).contains(&actual) {
            return Err(TaskDomainError::InvalidDescriptionLength {
                actual,
                min: Self::MIN_CHARS,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(value))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
