//! Handlers for `/patients`.

use axum::extract::{Path, RawQuery, State};
use axum::Json;
use clinic_core::forms::{FormState, Submitted};
use clinic_core::models::{Pagination, Patient, RecordListItem};
use clinic_core::schemas::patients::{CreatePatientForm, EditPatientForm};
use serde::Serialize;
use serde_json::Value;

use super::{parse_form, path_id, query_bag, run_action, Paging};
use crate::backend::Endpoint;
use crate::error::AppResult;
use crate::middleware::rbac::{PatientDetailPage, PatientsPage, Require};
use crate::response::{DataResponse, FormResponse};
use crate::state::AppState;

pub const MSG_PATIENT_ID: &str = "Id của bệnh nhân phải là số";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientsData {
    pub patient_list_page: Pagination<Patient>,
    pub create_patient_form: FormState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetailData {
    pub patient: Patient,
    pub records: Vec<RecordListItem>,
    pub edit_patient_form: FormState,
}

/// GET /patients
pub async fn list(
    State(state): State<AppState>,
    Require(user, _): Require<PatientsPage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<PatientsData>>> {
    let paging = Paging::from_bag(&query_bag(query.as_deref()));

    let patient_list_page = state
        .backend
        .list(&Endpoint::Patients, &paging.pairs())
        .bearer(&user.token)
        .fetch_json::<Pagination<Patient>>()
        .await?;

    Ok(Json(DataResponse {
        data: PatientsData {
            patient_list_page,
            create_patient_form: FormState::empty::<CreatePatientForm>(),
        },
    }))
}

/// POST /patients/create
pub async fn create(
    State(state): State<AppState>,
    Require(user, _): Require<PatientsPage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let Submitted { value, form } = parse_form::<CreatePatientForm>(raw)?;
    let request = state
        .backend
        .post(&Endpoint::Patients)
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}

/// GET /patients/{id}
///
/// The patient and their records are fetched concurrently; either failing
/// fails the page.
pub async fn detail(
    State(state): State<AppState>,
    Require(user, _): Require<PatientDetailPage>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<PatientDetailData>>> {
    let id = path_id(&id, MSG_PATIENT_ID)?;

    let patient = state
        .backend
        .get(&Endpoint::Patient(id))
        .bearer(&user.token)
        .fetch_body::<Patient>();
    let records = state
        .backend
        .get(&Endpoint::PatientRecords(id))
        .bearer(&user.token)
        .fetch_body::<Vec<RecordListItem>>();

    let (patient, records) = tokio::try_join!(patient, records)?;

    Ok(Json(DataResponse {
        data: PatientDetailData {
            patient,
            records,
            edit_patient_form: FormState::empty::<EditPatientForm>(),
        },
    }))
}

/// POST /patients/{id}/edit
pub async fn edit(
    State(state): State<AppState>,
    Require(user, _): Require<PatientDetailPage>,
    Path(id): Path<String>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let id = path_id(&id, MSG_PATIENT_ID)?;
    let Submitted { value, form } = parse_form::<EditPatientForm>(raw)?;
    let request = state
        .backend
        .put(&Endpoint::Patient(id))
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}
