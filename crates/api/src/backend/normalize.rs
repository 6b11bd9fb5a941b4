//! Normalization of failed backend calls.
//!
//! Every outbound call goes through [`ensure_success`]. A 2xx response is
//! handed back untouched; anything else becomes a single [`HttpError`] whose
//! message is picked in this order:
//!
//! 1. status 500 always reads [`MSG_SERVER_FAULT`];
//! 2. an empty body reads the fixed message for its status;
//! 3. a string `error` field;
//! 4. an array `error` field, or a body that is itself an array, joined;
//! 5. an `errors` object, joined, with entries naming a form field routed
//!    into that field when a form is supplied;
//! 6. the caller's message for that status;
//! 7. the raw body text.
//!
//! A refused or unreachable connection reads [`MSG_UNREACHABLE`] with status
//! 503. Other transport failures stay unclassified.

use clinic_core::forms::FormState;
use clinic_core::format::pascal_to_camel;
use serde_json::{Map, Value};

/// Any 500 from the backend.
pub const MSG_SERVER_FAULT: &str = "Lỗi xảy ra từ phía chủ";

/// The backend could not be reached at all.
pub const MSG_UNREACHABLE: &str = "Không thể kết nối tới máy chủ";

/// Caller-supplied messages by status, consulted after the body.
pub type StatusMessages = &'static [(u16, &'static str)];

/// A classified backend failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({status})")]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

impl HttpError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Outcome of a failed backend call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Anything the normalizer does not classify (timeouts, TLS, bodies
    /// that do not decode).
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Classify a transport error. Connection failures become a 503.
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() {
            tracing::warn!(error = %error, "Backend unreachable");
            FetchError::Http(HttpError::new(503, MSG_UNREACHABLE))
        } else {
            FetchError::Transport(error)
        }
    }
}

/// Fixed message for a failure whose body is empty.
pub fn empty_body_message(status: u16) -> &'static str {
    match status {
        400 => "Yêu cầu không hợp lệ",
        401 => "Phiên đăng nhập đã hết hạn, vui lòng đăng nhập lại",
        403 => "Bạn không có quyền thực hiện thao tác này",
        404 => "Không tìm thấy dữ liệu",
        409 => "Dữ liệu bị trùng lặp",
        _ => "Đã có lỗi xảy ra",
    }
}

/// Classify a non-2xx status and its body text.
pub fn classify(
    status: u16,
    body: &str,
    overrides: StatusMessages,
    form: Option<&mut FormState>,
) -> HttpError {
    if status == 500 {
        return HttpError::new(status, MSG_SERVER_FAULT);
    }
    if body.trim().is_empty() {
        return HttpError::new(status, empty_body_message(status));
    }

    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = message_from_json(&json, form) {
            return HttpError::new(status, message);
        }
    }

    if let Some((_, message)) = overrides.iter().find(|(s, _)| *s == status) {
        return HttpError::new(status, *message);
    }

    HttpError::new(status, body)
}

fn message_from_json(json: &Value, form: Option<&mut FormState>) -> Option<String> {
    match json {
        Value::Array(items) => Some(join(items.iter())),
        Value::Object(fields) => match fields.get("error") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(items)) => Some(join(items.iter())),
            _ => match fields.get("errors") {
                Some(Value::Object(errors)) => Some(route_errors(errors, form)),
                _ => None,
            },
        },
        _ => None,
    }
}

/// Join the `errors` object. Entries whose key names a form field go to
/// that field; the message keeps the rest, or everything if all were routed.
fn route_errors(errors: &Map<String, Value>, mut form: Option<&mut FormState>) -> String {
    let mut remaining = Vec::new();
    let mut all = Vec::new();

    for (key, value) in errors {
        let messages = flatten(value);
        all.extend(messages.iter().cloned());

        let field = pascal_to_camel(key);
        match form.as_deref_mut() {
            Some(form) if form.has_field(&field) => {
                for message in messages {
                    form.set_error(field.clone(), message);
                }
            }
            _ => remaining.extend(messages),
        }
    }

    if remaining.is_empty() {
        all.join(", ")
    } else {
        remaining.join(", ")
    }
}

fn flatten(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().flat_map(flatten).collect(),
        Value::String(s) => vec![s.clone()],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

fn join<'a>(items: impl Iterator<Item = &'a Value>) -> String {
    items.flat_map(flatten).collect::<Vec<_>>().join(", ")
}

/// Pass a successful response through; classify anything else.
pub async fn ensure_success(
    response: reqwest::Response,
    overrides: StatusMessages,
    form: Option<&mut FormState>,
) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(status = status.as_u16(), endpoint = %url, error = %e, "Failed to read backend error body");
            String::new()
        }
    };
    let error = classify(status.as_u16(), &body, overrides, form);

    if status.is_server_error() {
        tracing::error!(status = error.status, endpoint = %url, message = %error.message, "Backend call failed");
    } else {
        tracing::warn!(status = error.status, endpoint = %url, message = %error.message, "Backend call rejected");
    }

    Err(FetchError::Http(error))
}
