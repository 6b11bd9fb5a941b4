//! Route definitions for `/schedule`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/schedule`.
///
/// ```text
/// GET  /                  -> calendar (?date=YYYY-MM-DD)
/// POST /create            -> create
/// POST /{id}/edit         -> edit
/// GET  /confirm/{token}   -> confirm (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedule::calendar))
        .route("/create", post(schedule::create))
        .route("/{id}/edit", post(schedule::edit))
        .route("/confirm/{token}", get(schedule::confirm))
}
