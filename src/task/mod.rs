//! Task record management for Docket.
//!
//! This module implements the task resource lifecycle: validated creation,
//! lookup by public identifier, paginated listing, field-presence partial
//! updates and deletion. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
