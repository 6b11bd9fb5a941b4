//! Page loaders and form actions.
//!
//! Each submodule serves one section of the clinic application. Loaders run
//! the access filter through their extractor, fetch what the page shows from
//! the backend and answer with `{ "data": ... }`. Actions validate the posted
//! value bag against its schema, forward the coerced value, and answer with
//! the form state; validation and backend failures come back as
//! [`AppError::Form`] so the browser can redisplay the form.

pub mod applications;
pub mod auth;
pub mod invoices;
pub mod layout;
pub mod materials;
pub mod patients;
pub mod profile;
pub mod records;
pub mod schedule;
pub mod services;
pub mod statistic;
pub mod users;

use axum::http::StatusCode;
use axum::Json;
use clinic_core::error::CoreError;
use clinic_core::forms::{FormSchema, FormState, Submitted};
use clinic_core::types::DbId;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::backend::{BackendRequest, FetchError};
use crate::error::{status_of, AppError, AppResult, MSG_UNEXPECTED};
use crate::response::FormResponse;

/// Default page size of backend lists.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may ask for.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validate a posted value bag; failure is a 400 carrying the form.
pub(crate) fn parse_form<S: FormSchema>(raw: Value) -> AppResult<Submitted<S>> {
    FormState::submit::<S>(raw).map_err(|form| {
        tracing::debug!(form = form.id, fields = form.errors.len(), "Form rejected");
        AppError::form(StatusCode::BAD_REQUEST, form)
    })
}

/// Forward a validated form to the backend.
///
/// Field errors in the backend reply are attached to the form; everything
/// else becomes the form message.
pub(crate) async fn run_action(
    request: BackendRequest,
    mut form: FormState,
) -> AppResult<Json<FormResponse>> {
    match request.submit(&mut form).await {
        Ok(response) => {
            let data = response.json::<Value>().await.ok();
            tracing::info!(form = form.id, "Form action completed");
            Ok(Json(FormResponse { form, data }))
        }
        Err(e) => Err(action_failed(form, e)),
    }
}

/// Turn a backend failure during an action into a rejected form.
pub(crate) fn action_failed(mut form: FormState, error: FetchError) -> AppError {
    form.valid = false;
    match error {
        FetchError::Http(e) => {
            form.set_message(e.message);
            AppError::form(status_of(e.status), form)
        }
        FetchError::Transport(e) => {
            tracing::error!(form = form.id, error = %e, "Form action failed");
            form.set_message(MSG_UNEXPECTED);
            AppError::form(StatusCode::INTERNAL_SERVER_ERROR, form)
        }
    }
}

/// Decode a raw query string into a value bag. Repeated keys become arrays.
pub(crate) fn query_bag(query: Option<&str>) -> Value {
    let mut bag = Map::new();
    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        let value = Value::String(value.into_owned());
        match bag.get_mut(key.as_ref()) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                bag.insert(key.into_owned(), value);
            }
        }
    }
    Value::Object(bag)
}

/// Filter form of a list page. An empty query yields the schema defaults.
pub(crate) fn filter_form<S: FormSchema>(bag: &Value) -> AppResult<(S, FormState)> {
    let has_filter = bag
        .as_object()
        .is_some_and(|fields| fields.keys().any(|k| k != "page" && k != "size"));

    if !has_filter {
        return Ok((S::default(), FormState::empty::<S>()));
    }
    let Submitted { value, form } = parse_form::<S>(bag.clone())?;
    Ok((value, form))
}

/// Page number and size of a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paging {
    pub page: i64,
    pub size: i64,
}

impl Paging {
    pub fn from_bag(bag: &Value) -> Self {
        let read = |key: &str| {
            bag.get(key)
                .and_then(Value::as_str)
                .and_then(|s| s.trim().parse::<i64>().ok())
                .filter(|n| *n >= 1)
        };
        Self {
            page: read("page").unwrap_or(1),
            size: read("size").unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
        }
    }

    pub fn pairs(&self) -> [(String, String); 2] {
        [
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ]
    }
}

/// Backend query for a filtered, paged list.
pub(crate) fn list_query<S: serde::Serialize>(filter: &S, paging: Paging) -> Vec<(String, String)> {
    let mut pairs = clinic_core::forms::query_pairs(filter);
    pairs.extend(paging.pairs());
    pairs
}

/// Positive numeric id from a path segment.
pub(crate) fn path_id(raw: &str, message: &str) -> AppResult<DbId> {
    raw.trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Core(CoreError::Validation(message.to_string())))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use clinic_core::schemas::users::UserFilterForm;
    use serde_json::json;

    use super::*;

    #[test]
    fn repeated_query_keys_become_arrays() {
        let bag = query_bag(Some("roles=admin&roles=nurse&roles=doctor&name=An%20B%C3%ACnh"));
        assert_eq!(
            bag,
            json!({ "roles": ["admin", "nurse", "doctor"], "name": "An Bình" })
        );
        assert_eq!(query_bag(None), json!({}));
    }

    #[test]
    fn paging_defaults_and_bounds() {
        assert_eq!(Paging::from_bag(&json!({})), Paging { page: 1, size: 10 });
        assert_eq!(
            Paging::from_bag(&json!({ "page": "3", "size": "500" })),
            Paging { page: 3, size: MAX_PAGE_SIZE }
        );
        assert_eq!(Paging::from_bag(&json!({ "page": "-1" })).page, 1);
    }

    #[test]
    fn empty_filter_uses_defaults() {
        let (filter, form) = filter_form::<UserFilterForm>(&json!({ "page": "2" })).unwrap();
        assert_eq!(filter.roles.len(), 5);
        assert!(!form.posted);
    }

    #[test]
    fn invalid_filter_is_rejected_with_its_form() {
        let result = filter_form::<UserFilterForm>(&json!({ "fromSalary": "-1" }));
        assert_matches!(result, Err(AppError::Form { status, form }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(form.errors.contains_key("fromSalary"));
        });
    }

    #[test]
    fn path_ids_must_be_positive_numbers() {
        assert_eq!(path_id("12", "x").unwrap(), 12);
        assert_matches!(path_id("abc", "Id phải là số"), Err(AppError::Core(CoreError::Validation(m))) if m == "Id phải là số");
        assert_matches!(path_id("0", "x"), Err(_));
    }
}
