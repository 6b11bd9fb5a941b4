//! Route definitions for `/users`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users` (admin only).
///
/// ```text
/// GET  /            -> list
/// POST /create      -> create
/// POST /{id}/edit   -> edit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/create", post(users::create))
        .route("/{id}/edit", post(users::edit))
}
