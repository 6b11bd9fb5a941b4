//! Shared response envelope types for API handlers.
//!
//! Page loaders answer with a `{ "data": ... }` envelope; form actions answer
//! with `{ "form": ... }` and optionally the backend's reply under `data`.

use clinic_core::forms::FormState;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: page }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result of a successful form action.
#[derive(Debug, Serialize)]
pub struct FormResponse<T: Serialize = serde_json::Value> {
    pub form: FormState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl FormResponse {
    pub fn new(form: FormState) -> Self {
        Self { form, data: None }
    }
}

impl<T: Serialize> FormResponse<T> {
    pub fn with_data(form: FormState, data: T) -> Self {
        Self {
            form,
            data: Some(data),
        }
    }
}
