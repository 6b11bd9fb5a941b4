//! Route definitions for `/records`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Routes mounted at `/records`.
///
/// ```text
/// GET  /{id}                -> show
/// POST /{id}/edit           -> edit
/// POST /{id}/prescription   -> add_prescription_detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(records::show))
        .route("/{id}/edit", post(records::edit))
        .route("/{id}/prescription", post(records::add_prescription_detail))
}
