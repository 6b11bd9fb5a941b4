//! Route definitions for `/patients`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::patients;
use crate::state::AppState;

/// Routes mounted at `/patients`.
///
/// ```text
/// GET  /            -> list
/// POST /create      -> create
/// GET  /{id}        -> detail (doctors and nurses)
/// POST /{id}/edit   -> edit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(patients::list))
        .route("/create", post(patients::create))
        .route("/{id}", get(patients::detail))
        .route("/{id}/edit", post(patients::edit))
}
