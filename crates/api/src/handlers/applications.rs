//! Handlers for `/applications` (staff leave applications).

use axum::extract::{RawQuery, State};
use axum::Json;
use clinic_core::forms::{FormState, Submitted};
use clinic_core::models::{Application, Pagination};
use clinic_core::schemas::applications::{ApplicationFilterForm, CreateApplicationForm};
use serde::Serialize;
use serde_json::Value;

use super::{filter_form, list_query, parse_form, query_bag, run_action, Paging};
use crate::backend::Endpoint;
use crate::error::AppResult;
use crate::middleware::rbac::{ApplicationsPage, Require, StaffOnly};
use crate::response::{DataResponse, FormResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsData {
    pub application_list_page: Pagination<Application>,
    pub application_filter_form: FormState,
}

/// GET /applications
pub async fn list(
    State(state): State<AppState>,
    Require(user, _): Require<ApplicationsPage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<ApplicationsData>>> {
    let bag = query_bag(query.as_deref());
    let (filter, application_filter_form) = filter_form::<ApplicationFilterForm>(&bag)?;

    let application_list_page = state
        .backend
        .list(&Endpoint::Applications, &list_query(&filter, Paging::from_bag(&bag)))
        .bearer(&user.token)
        .fetch_json::<Pagination<Application>>()
        .await?;

    Ok(Json(DataResponse {
        data: ApplicationsData {
            application_list_page,
            application_filter_form,
        },
    }))
}

/// POST /applications/create
///
/// Any staff member may file an application; only admins see the list.
pub async fn create(
    State(state): State<AppState>,
    Require(user, _): Require<StaffOnly>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let Submitted { value, form } = parse_form::<CreateApplicationForm>(raw)?;
    let request = state
        .backend
        .post(&Endpoint::EmployeeApplications)
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}
