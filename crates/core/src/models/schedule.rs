use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{AnotherPerson, PatientInSchedule, UserMinimal};
use crate::calendar;
use crate::forms::de;
use crate::types::DbId;

/// An appointment as the calendar shows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleFull {
    pub id: DbId,
    #[serde(deserialize_with = "de::datetime")]
    pub start_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::datetime")]
    pub end_at: Option<NaiveDateTime>,
    pub doctor: UserMinimal,
    pub patient: PatientInSchedule,
    /// Raw status code; see [`crate::status::ScheduleStatus`].
    pub status: u8,
    pub is_patient_confirm: bool,
    pub description: Option<String>,
    pub order: i64,
    pub another_person_dto: Option<AnotherPerson>,
}

impl ScheduleFull {
    /// First calendar slot and number of slots covered. An appointment
    /// without an end covers a single slot.
    pub fn slots(&self) -> Option<(i64, i64)> {
        let start = self.start_at?;
        let span = self
            .end_at
            .map_or(1, |end| calendar::slot_span(start, end));
        Some((calendar::slot_index(start), span))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_backend_schedule() {
        let schedule: ScheduleFull = serde_json::from_value(json!({
            "id": 12,
            "startAt": "2024-05-16T08:00:00",
            "endAt": "2024-05-16T08:40:00",
            "doctor": { "id": 6, "name": "BS. Lan" },
            "patient": { "id": 9, "name": "Minh", "phone": "0912345678", "age": 30 },
            "status": 2,
            "isPatientConfirm": true,
            "description": null,
        }))
        .unwrap();

        assert_eq!(schedule.doctor.name, "BS. Lan");
        assert_eq!(schedule.slots(), Some((32, 3)));
        assert!(schedule.description.is_none());
    }

    #[test]
    fn missing_start_has_no_slot() {
        assert_eq!(ScheduleFull::default().slots(), None);
    }
}
