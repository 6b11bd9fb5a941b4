//! The `access-token` session cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::NaiveDateTime;

/// Name of the cookie carrying the backend access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access-token";

/// Session cookie holding `token`.
///
/// With `expires_at` the cookie persists until then ("remember me");
/// without it the cookie lives for the browser session.
pub fn session_cookie(
    token: String,
    expires_at: Option<NaiveDateTime>,
    secure: bool,
) -> Cookie<'static> {
    let mut builder = Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax);

    if let Some(at) = expires_at {
        let seconds = at.and_utc().timestamp();
        if let Ok(at) = time::OffsetDateTime::from_unix_timestamp(seconds) {
            builder = builder.expires(at);
        }
    }

    builder.build()
}

/// Empty cookie that expires immediately.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
