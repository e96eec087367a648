//! Docket: a task record service backed by a document store.
//!
//! This crate provides task creation, lookup, pagination, partial update and
//! deletion behind a small JSON HTTP surface.
//!
//! # Architecture
//!
//! Docket follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, their store contract and the task service
//! - [`http`]: Route table, response envelope and error mapping
//! - [`config`]: Environment-driven service configuration

pub mod config;
pub mod http;
pub mod task;
