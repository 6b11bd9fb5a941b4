use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in it changes after start-up.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the token key.
    pub config: Arc<ServerConfig>,
    /// Client for the clinic REST backend.
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(config: ServerConfig, backend: BackendClient) -> Self {
        Self {
            config: Arc::new(config),
            backend,
        }
    }
}
