//! Domain model for task records.
//!
//! The task domain models a titled, described record with identity and
//! timestamps, plus the partial update applied to it, while keeping all
//! storage and transport concerns outside of the domain boundary.

mod error;
mod fields;
mod ids;
mod patch;
mod task;

pub use error::TaskDomainError;
pub use fields::{TaskDescription, TaskTitle};
pub use ids::{DocumentId, TaskId};
pub use patch::TaskPatch;
pub use task::{PersistedTaskData, Task};
