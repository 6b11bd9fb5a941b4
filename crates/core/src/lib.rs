//! Domain layer of the clinic front-end server.
//!
//! Everything here is pure: roles and the access filter, the request
//! identity, form schemas and their validation, backend DTOs, and the small
//! presentation helpers used by page loaders. No HTTP, no I/O.

pub mod access;
pub mod calendar;
pub mod error;
pub mod features;
pub mod format;
pub mod forms;
pub mod identity;
pub mod models;
pub mod queue;
pub mod roles;
pub mod schemas;
pub mod status;
pub mod types;
