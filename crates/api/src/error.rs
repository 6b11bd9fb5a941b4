use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clinic_core::access::Denial;
use clinic_core::error::CoreError;
use clinic_core::forms::FormState;
use serde_json::json;

use crate::backend::{FetchError, HttpError};

/// Shown for every failure nobody classified.
pub const MSG_UNEXPECTED: &str = "Đã có lỗi không mong muốn xảy ra";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds the page-level outcomes:
/// redirects, access denials, backend failures and rejected forms.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `clinic_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Send the browser elsewhere (303 See Other).
    #[error("Redirect to {0}")]
    Redirect(String),

    /// The access filter turned the caller away.
    #[error("Access denied: {}", .0.message())]
    Denied(Denial),

    /// A normalized backend failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A form that failed validation or was rejected by the backend.
    #[error("Form {} rejected", .form.id)]
    Form {
        status: StatusCode,
        form: Box<FormState>,
    },

    /// An internal error; the detail is logged, never shown.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Reject `form` with `status`.
    pub fn form(status: StatusCode, form: FormState) -> Self {
        AppError::Form {
            status,
            form: Box::new(form),
        }
    }

    /// Blank `fields` in a rejected form; other errors pass through.
    pub fn redact(mut self, fields: &[&str]) -> Self {
        if let AppError::Form { form, .. } = &mut self {
            form.redact(fields);
        }
        self
    }
}

impl From<FetchError> for AppError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::Http(e) => AppError::Http(e),
            FetchError::Transport(e) => AppError::InternalError(e.to_string()),
        }
    }
}

/// Status for a backend-reported code, falling back to 502 when the code is
/// not a valid HTTP status.
pub fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Redirect(location) => {
                return (StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response();
            }
            AppError::Form { status, form } => {
                return (status, axum::Json(json!({ "form": form }))).into_response();
            }

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            },

            AppError::Denied(denial) => {
                let code = match denial {
                    Denial::MissingRole => "UNAUTHORIZED",
                    Denial::AlreadySignedIn => "FORBIDDEN",
                };
                (status_of(denial.status_code()), code, denial.message().to_string())
            }

            AppError::Http(e) => (status_of(e.status), "BACKEND_ERROR", e.message),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    MSG_UNEXPECTED.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
