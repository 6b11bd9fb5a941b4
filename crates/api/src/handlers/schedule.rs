//! Handlers for `/schedule` (week calendar, bookings, patient confirmation).

use axum::extract::{Path, RawQuery, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use clinic_core::calendar::WeekRange;
use clinic_core::forms::de::parse_date;
use clinic_core::forms::{FormSchema, FormState, Submitted};
use clinic_core::format::full_date;
use clinic_core::identity::Identity;
use clinic_core::models::ScheduleFull;
use clinic_core::schemas::schedule::{
    CreateAppointmentForm, CreateAppointmentPatientForm, EditScheduleForm, ScheduleFilterForm,
};
use clinic_core::status::ScheduleStatus;
use serde::Serialize;
use serde_json::Value;

use super::{filter_form, parse_form, path_id, query_bag, run_action};
use crate::backend::{Endpoint, FetchError};
use crate::error::AppResult;
use crate::middleware::rbac::{Require, SchedulePage};
use crate::response::{DataResponse, FormResponse};
use crate::state::AppState;

pub const MSG_SCHEDULE_ID: &str = "Id của lịch hẹn phải là số";
pub const MSG_INVALID_TOKEN: &str = "Token không hợp lệ";
pub const MSG_CONFIRM_FAILED: &str = "Đã có lỗi xảy ra";

/// Marks a confirmation link as "confirm"; any other last character declines.
const CONFIRM_MARK: char = ';';

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub title: String,
}

/// An appointment with its position on the calendar grid.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    #[serde(flatten)]
    pub schedule: ScheduleFull,
    pub slot: Option<i64>,
    pub span: Option<i64>,
    pub status_label: Option<&'static str>,
}

impl From<ScheduleFull> for CalendarEntry {
    fn from(schedule: ScheduleFull) -> Self {
        let slots = schedule.slots();
        let status_label = ScheduleStatus::try_from(schedule.status)
            .ok()
            .map(ScheduleStatus::label);
        Self {
            slot: slots.map(|(slot, _)| slot),
            span: slots.map(|(_, span)| span),
            status_label,
            schedule,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    pub week: WeekRange,
    pub previous_week: NaiveDate,
    pub next_week: NaiveDate,
    pub days: Vec<CalendarDay>,
    pub schedules: Vec<CalendarEntry>,
    pub create_appointment_form: FormState,
    pub edit_schedule_form: FormState,
    pub schedule_filter_form: FormState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmData {
    pub error_msg: String,
    pub confirmed: bool,
}

/// GET /schedule
///
/// Shows the Monday-to-Sunday week around `?date=` (today by default).
pub async fn calendar(
    State(state): State<AppState>,
    Require(user, _): Require<SchedulePage>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<ScheduleData>>> {
    let mut bag = query_bag(query.as_deref());
    let day = bag
        .as_object_mut()
        .and_then(|fields| fields.remove("date"))
        .and_then(|v| v.as_str().and_then(parse_date))
        .unwrap_or_else(|| Local::now().date_naive());
    let week = WeekRange::containing(day);

    let (filter, schedule_filter_form) = filter_form::<ScheduleFilterForm>(&bag)?;
    let mut pairs = clinic_core::forms::query_pairs(&filter);
    pairs.push(("from".to_string(), week.start.to_string()));
    pairs.push(("to".to_string(), week.end.to_string()));

    let schedules = state
        .backend
        .list(&Endpoint::Schedules, &pairs)
        .bearer(&user.token)
        .fetch_body::<Vec<ScheduleFull>>()
        .await?;

    let create_appointment_form = if user.is_patient {
        FormState::empty::<CreateAppointmentPatientForm>()
    } else {
        FormState::empty::<CreateAppointmentForm>()
    };

    Ok(Json(DataResponse {
        data: ScheduleData {
            week,
            previous_week: week.previous().start,
            next_week: week.next().start,
            days: week
                .days()
                .map(|date| CalendarDay {
                    date,
                    title: full_date(Some(date)),
                })
                .collect(),
            schedules: schedules.into_iter().map(CalendarEntry::from).collect(),
            create_appointment_form,
            edit_schedule_form: FormState::empty::<EditScheduleForm>(),
            schedule_filter_form,
        },
    }))
}

/// POST /schedule/create
///
/// Patients book for themselves with the shorter patient form.
pub async fn create(
    State(state): State<AppState>,
    Require(user, _): Require<SchedulePage>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    if user.is_patient {
        book::<CreateAppointmentPatientForm>(&state, &user, raw).await
    } else {
        book::<CreateAppointmentForm>(&state, &user, raw).await
    }
}

async fn book<S: FormSchema>(
    state: &AppState,
    user: &Identity,
    raw: Value,
) -> AppResult<Json<FormResponse>> {
    let Submitted { value, form } = parse_form::<S>(raw)?;
    let request = state
        .backend
        .post(&Endpoint::Schedules)
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}

/// POST /schedule/{id}/edit
pub async fn edit(
    State(state): State<AppState>,
    Require(user, _): Require<SchedulePage>,
    Path(id): Path<String>,
    Json(raw): Json<Value>,
) -> AppResult<Json<FormResponse>> {
    let id = path_id(&id, MSG_SCHEDULE_ID)?;
    let Submitted { value, form } = parse_form::<EditScheduleForm>(raw)?;
    let request = state
        .backend
        .put(&Endpoint::Schedule(id))
        .bearer(&user.token)
        .json(&value);
    run_action(request, form).await
}

/// Split a confirmation link token into the backend token and the answer.
pub fn parse_confirmation(token: &str) -> Option<(&str, bool)> {
    let mark = token.chars().last()?;
    let token = &token[..token.len() - mark.len_utf8()];
    if token.is_empty() {
        return None;
    }
    Some((token, mark == CONFIRM_MARK))
}

/// GET /schedule/confirm/{token}
///
/// Public: the link in the reminder email is the only credential. Always
/// answers 200; failures are reported in `errorMsg`.
pub async fn confirm(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Json<DataResponse<ConfirmData>> {
    let Some((token, confirmed)) = parse_confirmation(&token) else {
        return Json(DataResponse {
            data: ConfirmData {
                error_msg: MSG_INVALID_TOKEN.to_string(),
                confirmed: false,
            },
        });
    };

    let result = state
        .backend
        .put(&Endpoint::ConfirmSchedule {
            token: token.to_string(),
            confirmed,
        })
        .send()
        .await;

    let error_msg = match result {
        Ok(_) => String::new(),
        Err(FetchError::Http(e)) => e.message,
        Err(FetchError::Transport(e)) => {
            tracing::error!(error = %e, "Schedule confirmation failed");
            MSG_CONFIRM_FAILED.to_string()
        }
    };

    Json(DataResponse {
        data: ConfirmData {
            error_msg,
            confirmed,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_semicolon_confirms() {
        assert_eq!(parse_confirmation("abc123;"), Some(("abc123", true)));
        assert_eq!(parse_confirmation("abc123!"), Some(("abc123", false)));
        assert_eq!(parse_confirmation("abc123x"), Some(("abc123", false)));
    }

    #[test]
    fn empty_tokens_are_invalid() {
        assert_eq!(parse_confirmation(""), None);
        assert_eq!(parse_confirmation(";"), None);
    }

    #[test]
    fn multibyte_mark_is_split_on_a_char_boundary() {
        assert_eq!(parse_confirmation("tok€"), Some(("tok", false)));
    }
}
