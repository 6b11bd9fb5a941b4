//! Appointment forms for the schedule calendar.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::end_after_start;
use crate::forms::{de, FormErrors, FormSchema};

/// Staff booking on behalf of a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAppointmentForm {
    #[serde(deserialize_with = "de::datetime")]
    #[validate(required(message = "Vui lòng chọn thời gian bắt đầu"))]
    pub start_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::datetime")]
    #[validate(required(message = "Vui lòng chọn thời gian kết thúc"))]
    pub end_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn bệnh nhân"),
        range(min = 1, message = "Vui lòng chọn bệnh nhân")
    )]
    pub patient_id: Option<i64>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn bác sĩ"),
        range(min = 1, message = "Vui lòng chọn bác sĩ")
    )]
    pub doctor_id: Option<i64>,
    #[serde(deserialize_with = "de::trimmed")]
    pub description: Option<String>,
}

impl FormSchema for CreateAppointmentForm {
    const ID: &'static str = "create-appointment";

    fn refine(&self, errors: &mut FormErrors) {
        end_after_start(self.start_at, self.end_at, errors);
    }
}

/// A patient booking for themselves; the backend picks the end.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAppointmentPatientForm {
    #[serde(deserialize_with = "de::datetime")]
    #[validate(required(message = "Vui lòng chọn thời gian bắt đầu"))]
    pub start_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn bác sĩ"),
        range(min = 1, message = "Vui lòng chọn bác sĩ")
    )]
    pub doctor_id: Option<i64>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Vui lòng nhập mô tả"),
        length(min = 1, message = "Vui lòng nhập mô tả")
    )]
    pub description: Option<String>,
}

impl FormSchema for CreateAppointmentPatientForm {
    const ID: &'static str = "create-appointment-patient";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EditScheduleForm {
    #[serde(deserialize_with = "de::datetime")]
    #[validate(required(message = "Vui lòng chọn thời gian bắt đầu"))]
    pub start_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::datetime")]
    #[validate(required(message = "Vui lòng chọn thời gian kết thúc"))]
    pub end_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn bác sĩ"),
        range(min = 1, message = "Vui lòng chọn bác sĩ")
    )]
    pub doctor_id: Option<i64>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn trạng thái"),
        range(min = 1, max = 4, message = "Vui lòng chọn trạng thái")
    )]
    pub status: Option<i64>,
    #[serde(deserialize_with = "de::string")]
    #[validate(
        required(message = "Vui lòng nhập mô tả"),
        length(min = 1, message = "Vui lòng nhập mô tả")
    )]
    pub description: Option<String>,
}

impl FormSchema for EditScheduleForm {
    const ID: &'static str = "edit-schedule";

    fn refine(&self, errors: &mut FormErrors) {
        end_after_start(self.start_at, self.end_at, errors);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleFilterForm {
    #[serde(deserialize_with = "de::text")]
    pub patient_phone: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub doctor_name: Option<String>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(range(min = 1, max = 3, message = "Trạng thái không hợp lệ"))]
    pub status: Option<i64>,
    #[serde(deserialize_with = "de::boolean")]
    pub is_patient_confirm: Option<bool>,
}

impl FormSchema for ScheduleFilterForm {
    const ID: &'static str = "schedule-filter";
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::forms::validate;
    use crate::schemas::MSG_END_BEFORE_START;

    #[test]
    fn appointment_must_end_after_it_starts() {
        let errors = validate::<CreateAppointmentForm>(&json!({
            "startAt": "2024-05-16T09:00",
            "endAt": "2024-05-16T08:45",
            "patientId": 3,
            "doctorId": 6,
        }))
        .unwrap_err();
        assert_eq!(errors.field("endAt"), Some(&[MSG_END_BEFORE_START.to_string()][..]));
    }

    #[test]
    fn appointment_needs_patient_and_doctor() {
        let errors = validate::<CreateAppointmentForm>(&json!({
            "startAt": "2024-05-16T09:00",
            "endAt": "2024-05-16T09:30",
            "patientId": 0,
        }))
        .unwrap_err();
        assert_eq!(errors.field("patientId"), Some(&["Vui lòng chọn bệnh nhân".to_string()][..]));
        assert_eq!(errors.field("doctorId"), Some(&["Vui lòng chọn bác sĩ".to_string()][..]));
    }

    #[test]
    fn patient_booking_requires_description() {
        let ok = validate::<CreateAppointmentPatientForm>(&json!({
            "startAt": "2024-05-16T09:00:00+07:00",
            "doctorId": "6",
            "description": "Đau răng",
        }));
        assert!(ok.is_ok());

        let errors = validate::<CreateAppointmentPatientForm>(&json!({
            "startAt": "2024-05-16T09:00",
            "doctorId": 6,
            "description": "  ",
        }))
        .unwrap_err();
        assert!(errors.field("description").is_some());
    }

    #[test]
    fn filter_status_is_bounded() {
        assert!(validate::<ScheduleFilterForm>(&json!({ "status": "2" })).is_ok());
        assert!(validate::<ScheduleFilterForm>(&json!({ "status": 4 })).is_err());
        assert!(validate::<ScheduleFilterForm>(&json!({})).is_ok());
    }
}
