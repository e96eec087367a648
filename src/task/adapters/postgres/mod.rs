//! `PostgreSQL` adapters for task persistence.

mod models;
mod store;
mod schema;

pub use store::{PostgresTaskStore, TaskPgPool, build_pool};
