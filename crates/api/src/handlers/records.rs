//! Handlers for `/records/{id}` (medical record and its prescription).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_core::forms::{FormState, Submitted};
use clinic_core::identity::Identity;
use clinic_core::models::{Prescription, RecordPatient};
use clinic_core::schemas::records::{EditPrescriptionDetailForm, EditRecordForm};
use clinic_core::types::DbId;
use serde::Serialize;
use serde_json::Value;

use super::{parse_form, path_id, run_action};
use crate::backend::{Endpoint, FetchError, HttpError};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RecordsPage, Require};
use crate::response::{DataResponse, FormResponse};
use crate::state::AppState;

pub const MSG_RECORD_ID: &str = "Id của hồ sơ phải là số";
pub const MSG_RECORD_NOT_FOUND: &str = "Hồ sơ không tồn tại";
pub const MSG_NO_PRESCRIPTION: &str = "Hồ sơ chưa có đơn thuốc";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordData {
    pub record_id: DbId,
    pub record: RecordPatient,
    pub prescription: Option<Prescription>,
    pub edit_record_form: FormState,
    pub edit_prescription_detail_form: FormState,
}

async fn fetch_record(state: &AppState, user: &Identity, id: DbId) -> Result<RecordPatient, FetchError> {
    state
        .backend
        .get(&Endpoint::Record(id))
        .bearer(&user.token)
        .fetch_body::<RecordPatient>()
        .await
        .map_err(|e| match e {
            FetchError::Http(e) if e.status == 404 => {
                HttpError::new(404, MSG_RECORD_NOT_FOUND).into()
            }
            other => other,
        })
}

/// GET /records/{id}
///
/// The prescription is only fetched when the record references one.
pub async fn show(
    State(state): State<AppState>,
    Require(user, _): Require<RecordsPage>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<RecordData>>> {
    let record_id = path_id(&id, MSG_RECORD_ID)?;
    let record = fetch_record(&state, &user, record_id).await?;

    let prescription = match record.prescription_id {
        Some(prescription_id) => {
            let mut prescription = state
                .backend
                .get(&Endpoint::Prescription(prescription_id))
                .bearer(&user.token)
                .fetch_body::<Prescription>()
                .await?;
            prescription.normalize_indication();
            Some(prescription)
        }
        None => None,
    };

    Ok(Json(DataResponse {
        data: RecordData {
            record_id,
            record,
            prescription,
            edit_record_form: FormState::empty::<EditRecordForm>(),
            edit_prescription_detail_form: FormState::empty::<EditPrescriptionDetailForm>(),
        },
    }))
}

/// POST /records/{id}/edit
pub async fn edit(
    State(state): State<AppState>,
    Require(user, _): Require<RecordsPage>,
    Path(id): Path<String>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let id = path_id(&id, MSG_RECORD_ID)?;
    let Submitted { value, form } = parse_form::<EditRecordForm>(raw)?;
    let request = state
        .backend
        .put(&Endpoint::Record(id))
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}

/// POST /records/{id}/prescription
///
/// Adds a line to the record's prescription.
pub async fn add_prescription_detail(
    State(state): State<AppState>,
    Require(user, _): Require<RecordsPage>,
    Path(id): Path<String>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let id = path_id(&id, MSG_RECORD_ID)?;
    let Submitted { value, mut form } = parse_form::<EditPrescriptionDetailForm>(raw)?;

    let record = match fetch_record(&state, &user, id).await {
        Ok(record) => record,
        Err(e) => return Err(super::action_failed(form, e)),
    };
    let Some(prescription_id) = record.prescription_id else {
        form.valid = false;
        form.set_message(MSG_NO_PRESCRIPTION);
        return Err(AppError::form(StatusCode::CONFLICT, form));
    };

    let request = state
        .backend
        .post(&Endpoint::PrescriptionDetails(prescription_id))
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}
