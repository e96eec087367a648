//! HTTP surface of the task service.
//!
//! Handlers map each route onto one [`crate::task::services::TaskService`]
//! call and wrap the outcome in the uniform [`Envelope`].

mod envelope;
mod error;
pub mod handlers;
mod routes;

pub use envelope::Envelope;
pub use error::ApiError;
pub use handlers::AppState;
pub use routes::{MAX_BODY_BYTES, TASKS_PATH, router};
