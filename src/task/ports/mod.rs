//! Port contracts for task storage.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod store;

pub use store::{
    InsertAck, TaskFilter, TaskPage, TaskPipeline, TaskStore, TaskStoreError, TaskStoreResult,
    UpdateOutcome,
};

#[cfg(test)]
pub use store::MockTaskStore;
