//! Route definitions for `/applications`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET  /         -> list (admin)
/// POST /create   -> create (any staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(applications::list))
        .route("/create", post(applications::create))
}
