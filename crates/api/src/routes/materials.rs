//! Route definitions for `/materials`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::materials;
use crate::state::AppState;

/// Routes mounted at `/materials`.
///
/// ```text
/// GET  /                    -> list
/// GET  /imports             -> imports
/// GET  /exports             -> exports
/// POST /create              -> create
/// POST /types/create        -> create_type
/// POST /suppliers/create    -> create_supplier
/// POST /import              -> import
/// POST /export              -> export
/// POST /export/edit         -> edit_export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(materials::list))
        .route("/imports", get(materials::imports))
        .route("/exports", get(materials::exports))
        .route("/create", post(materials::create))
        .route("/types/create", post(materials::create_type))
        .route("/suppliers/create", post(materials::create_supplier))
        .route("/import", post(materials::import))
        .route("/export", post(materials::export))
        .route("/export/edit", post(materials::edit_export))
}
