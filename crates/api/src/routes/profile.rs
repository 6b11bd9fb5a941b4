//! Route definitions for `/profile`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET  /                  -> show
/// POST /edit              -> edit
/// POST /change-password   -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/edit", post(profile::edit))
        .route("/change-password", post(profile::change_password))
}
