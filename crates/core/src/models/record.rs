use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{AnotherPerson, MaterialInRelation, Medicine, PatientInSchedule, UserMinimal};
use crate::forms::de;
use crate::types::DbId;

/// Entry of a patient's record history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordListItem {
    pub id: DbId,
    pub doctor_name: String,
    pub doctor_phone: String,
    #[serde(deserialize_with = "de::datetime")]
    pub visit_date: Option<NaiveDateTime>,
    pub diagnosis: String,
    pub reason: String,
    pub is_re_visit: bool,
    pub another_person_dto: Option<AnotherPerson>,
    pub status: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordTreatment {
    pub implementer_name: String,
    pub implementer_phone: String,
    pub note: String,
    pub treatment_name: String,
    pub treatment_id: DbId,
    #[serde(deserialize_with = "de::datetime")]
    pub action_at: Option<NaiveDateTime>,
    pub number: i64,
    pub default_materials: Vec<MaterialInRelation>,
}

/// A single medical record with its treatments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPatient {
    pub doctor: UserMinimal,
    pub patient: PatientInSchedule,
    pub status: u8,
    pub diagnostic: String,
    pub reason: String,
    pub prescription_id: Option<DbId>,
    pub record_treatment_list_item_dtos: Vec<RecordTreatment>,
    pub extra_materials: Vec<MaterialInRelation>,
    pub another_person_dto: Option<AnotherPerson>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicineDetail {
    #[serde(flatten)]
    pub medicine: Medicine,
    pub name: String,
    pub price: f64,
    pub quantity: f64,
    pub weight: f64,
    pub unit: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionDetail {
    pub id: DbId,
    /// The backend spells this key `quantiy`.
    #[serde(rename = "quantiy")]
    pub quantity: f64,
    pub unit: String,
    pub is_basic_unit: bool,
    pub medicine_detail: MedicineDetail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prescription {
    pub id: DbId,
    #[serde(deserialize_with = "de::datetime")]
    pub date: Option<NaiveDateTime>,
    pub indication: String,
    pub record_id: DbId,
    #[serde(deserialize_with = "de::datetime")]
    pub create_at: Option<NaiveDateTime>,
    pub create_by: UserMinimal,
    pub details: Vec<PrescriptionDetail>,
    pub patients: UserMinimal,
}

impl Prescription {
    /// The backend stores an empty indication as `-`.
    pub fn normalize_indication(&mut self) {
        if self.indication == "-" {
            self.indication.clear();
        }
    }
}

/// Patient waiting in, or being seen from, a doctor's queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueItem {
    pub id: DbId,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub export_id: Option<DbId>,
    pub diagnostic: Option<String>,
    pub reason: Option<String>,
    pub status: i64,
    #[serde(deserialize_with = "de::datetime")]
    pub start_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::datetime")]
    pub end_at: Option<NaiveDateTime>,
    pub is_re_visit: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn placeholder_indication_is_cleared() {
        let mut prescription: Prescription = serde_json::from_value(json!({
            "id": 1,
            "indication": "-",
            "details": [{ "id": 2, "quantiy": 3, "medicineDetail": { "id": 5, "name": "Paracetamol", "dosage": "2 viên/ngày" } }],
        }))
        .unwrap();
        prescription.normalize_indication();

        assert_eq!(prescription.indication, "");
        assert_eq!(prescription.details[0].quantity, 3.0);
        assert_eq!(prescription.details[0].medicine_detail.medicine.dosage, "2 viên/ngày");
    }
}
