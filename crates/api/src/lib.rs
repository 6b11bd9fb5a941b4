//! Clinic front-end server library.
//!
//! Exposes the building blocks (config, state, session middleware, backend
//! client, routes) so integration tests and the binary entrypoint share the
//! exact same application.

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
