//! Session resolution.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::auth::cookie::ACCESS_TOKEN_COOKIE;
use crate::auth::jwt::resolve_identity;
use crate::state::AppState;

/// Attach the caller's identity to the request when the `access-token`
/// cookie holds a valid token.
///
/// A missing, malformed or expired token never fails the request: it
/// proceeds anonymously and the access filter decides what that means.
pub async fn resolve_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty());

    if let Some(token) = token {
        match resolve_identity(token, &state.config.jwt) {
            Ok(identity) => {
                tracing::debug!(user_id = %identity.id, roles = identity.roles.len(), "Session resolved");
                request.extensions_mut().insert(identity);
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "Ignoring access token");
            }
        }
    }

    next.run(request).await
}
