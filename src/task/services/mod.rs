//! Application services for task record management.

mod lifecycle;
mod pagination;

pub use lifecycle::{
    CreateTaskRequest, DEFAULT_OPERATION_TIMEOUT, TaskDeletion, TaskOperation, TaskService,
    TaskServiceError, TaskServiceResult, TaskUpdate, UpdateTaskRequest,
};
pub use pagination::PageRequest;
