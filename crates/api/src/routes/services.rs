//! Route definitions for `/services`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::services;
use crate::state::AppState;

/// Routes mounted at `/services`.
///
/// ```text
/// GET  /         -> list
/// POST /create   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list))
        .route("/create", post(services::create))
}
