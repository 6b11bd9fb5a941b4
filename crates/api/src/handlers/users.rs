//! Handlers for `/users` (staff management, admin only).

use axum::extract::{Path, RawQuery, State};
use axum::Json;
use clinic_core::forms::{FormState, Submitted};
use clinic_core::models::{Pagination, User};
use clinic_core::roles::Role;
use clinic_core::schemas::users::{CreateUserForm, EditUserForm, UserFilterForm};
use clinic_core::types::DbId;
use serde::Serialize;
use serde_json::{json, Value};

use super::{filter_form, list_query, parse_form, path_id, query_bag, run_action, Paging};
use crate::backend::Endpoint;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Require, UsersPage};
use crate::response::{DataResponse, FormResponse};
use crate::state::AppState;

pub const MSG_USER_ID: &str = "Id của nhân viên phải là số";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersData {
    pub user_filter_form: FormState,
    pub create_user_form: FormState,
    pub edit_user_form: FormState,
    pub user_list_page: Pagination<User>,
}

/// GET /users
pub async fn list(
    State(state): State<AppState>,
    Require(user, _): Require<UsersPage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<UsersData>>> {
    let bag = query_bag(query.as_deref());
    let (filter, user_filter_form) = filter_form::<UserFilterForm>(&bag)?;

    let user_list_page = state
        .backend
        .list(&Endpoint::Users, &list_query(&filter, Paging::from_bag(&bag)))
        .bearer(&user.token)
        .fetch_json::<Pagination<User>>()
        .await?;

    Ok(Json(DataResponse {
        data: UsersData {
            user_filter_form,
            create_user_form: FormState::empty::<CreateUserForm>(),
            edit_user_form: FormState::empty::<EditUserForm>(),
            user_list_page,
        },
    }))
}

/// POST /users/create
pub async fn create(
    State(state): State<AppState>,
    Require(user, _): Require<UsersPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let Submitted { value, form } = parse_form::<CreateUserForm>(raw)?;
    let payload = with_role_ids(&value, &value.roles)?;

    let request = state
        .backend
        .post(&Endpoint::Users)
        .bearer(&user.token)
        .json(&payload);
    run_action(request, form).await
}

/// POST /users/{id}/edit
pub async fn edit(
    State(state): State<AppState>,
    Require(user, _): Require<UsersPage>,
    Path(id): Path<String>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let id = path_id(&id, MSG_USER_ID)?;
    let Submitted { value, form } = parse_form::<EditUserForm>(raw)?;

    let mut payload = with_role_ids(&value, &value.roles)?;
    payload["id"] = json!(id);

    let request = state
        .backend
        .put(&Endpoint::User(id))
        .bearer(&user.token)
        .json(&payload);
    run_action(request, form).await
}

/// The backend stores roles by id; forms carry wire names.
fn with_role_ids<T: Serialize>(value: &T, roles: &[String]) -> AppResult<Value> {
    let mut payload =
        serde_json::to_value(value).map_err(|e| AppError::InternalError(e.to_string()))?;
    payload["roles"] = json!(role_ids(roles));
    Ok(payload)
}

fn role_ids(roles: &[String]) -> Vec<DbId> {
    roles
        .iter()
        .filter_map(|name| name.parse::<Role>().ok())
        .filter_map(Role::backend_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_map_to_backend_ids() {
        let names = ["admin", "Doctor", "patient", "janitor"].map(String::from);
        assert_eq!(role_ids(&names), vec![1, 6]);
    }

    #[test]
    fn payload_carries_ids_instead_of_names() {
        let form = CreateUserForm {
            roles: vec!["nurse".into(), "receptionist".into()],
            ..CreateUserForm::default()
        };
        let payload = with_role_ids(&form, &form.roles).unwrap();
        assert_eq!(payload["roles"], json!([4, 5]));
        assert_eq!(payload["salary"], json!(0.0));
    }
}
