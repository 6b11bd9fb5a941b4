//! Handlers for the `/auth` pages (login, logout).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use axum_extra::extract::CookieJar;
use clinic_core::forms::{FormState, Submitted};
use clinic_core::models::LoginResult;
use clinic_core::schemas::auth::LoginForm;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{action_failed, parse_form};
use crate::auth::cookie::{removal_cookie, session_cookie};
use crate::backend::normalize::StatusMessages;
use crate::backend::Endpoint;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::AnonymousOnly;
use crate::response::DataResponse;
use crate::state::AppState;

/// Shown when the backend rejects a login without saying why.
pub const MSG_LOGIN_FAILED: &str = "Xảy ra lỗi khi đăng nhập";

const LOGIN_FAILURES: StatusMessages = &[
    (400, MSG_LOGIN_FAILED),
    (401, MSG_LOGIN_FAILED),
    (403, MSG_LOGIN_FAILED),
    (404, MSG_LOGIN_FAILED),
];

/// Never echoed back to the browser.
const SECRET_FIELDS: [&str; 1] = ["password"];

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginQuery {
    pub back_to: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageData {
    pub login_form: FormState,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /auth/login
pub async fn login_page(_: AnonymousOnly) -> Json<DataResponse<LoginPageData>> {
    Json(DataResponse {
        data: LoginPageData {
            login_form: FormState::empty::<LoginForm>(),
        },
    })
}

/// POST /auth/login
///
/// Staff sign in with email or phone, patients with email only. On success
/// the access token lands in the session cookie and the browser is sent back
/// to `backTo`.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    jar: CookieJar,
    Json(raw): Json<serde_json::Value>,
) -> AppResult<(CookieJar, Redirect)> {
    let Submitted { value, mut form } =
        parse_form::<LoginForm>(raw).map_err(|e| e.redact(&SECRET_FIELDS))?;
    form.redact(&SECRET_FIELDS);

    if let Err(message) = value.check_patient_login() {
        form.set_error("emailOrPhone", message);
        return Err(AppError::form(StatusCode::BAD_REQUEST, form));
    }

    let login = value.email_or_phone.as_deref().unwrap_or_default();
    let password = value.password.as_deref().unwrap_or_default();
    let (endpoint, body) = if value.is_user {
        (
            Endpoint::LoginUser,
            json!({ "emailOrPhone": login, "password": password }),
        )
    } else {
        (
            Endpoint::LoginPatient,
            json!({ "email": login, "password": password }),
        )
    };

    let session = state
        .backend
        .post(&endpoint)
        .json(&body)
        .on_status(LOGIN_FAILURES)
        .fetch_body::<LoginResult>()
        .await
        .map_err(|e| action_failed(form, e))?;

    let expires_at = if value.remember_me {
        session.expire_at
    } else {
        None
    };
    let jar = jar.add(session_cookie(
        session.token,
        expires_at,
        state.config.cookie_secure,
    ));

    tracing::info!(staff = value.is_user, remember = value.remember_me, "Signed in");

    Ok((jar, Redirect::to(&safe_back_to(query.back_to.as_deref()))))
}

/// POST /auth/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(removal_cookie()), Redirect::to("/"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Same-origin path to return to after login; anything else goes home.
pub fn safe_back_to(back_to: Option<&str>) -> String {
    match back_to {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\") =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_to_only_allows_local_paths() {
        assert_eq!(safe_back_to(Some("/users?page=2")), "/users?page=2");
        assert_eq!(safe_back_to(None), "/");
        assert_eq!(safe_back_to(Some("")), "/");
        assert_eq!(safe_back_to(Some("https://evil.example")), "/");
        assert_eq!(safe_back_to(Some("//evil.example")), "/");
        assert_eq!(safe_back_to(Some("/\\evil.example")), "/");
    }
}
