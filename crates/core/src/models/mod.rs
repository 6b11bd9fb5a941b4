//! Backend DTOs.
//!
//! The clinic REST backend answers in camelCase JSON and is loose about
//! nulls, so every model tolerates missing fields (`#[serde(default)]`) and
//! decodes dates with the lenient decoders in [`crate::forms::de`].

mod application;
mod material;
mod patient;
mod payment;
mod record;
mod schedule;
mod user;

pub use application::Application;
pub use material::{
    ExportGroup, ExportMaterial, Material, MaterialDetail, MaterialImport, MaterialInRelation,
    MaterialType, Medicine, Supplier, Treatment,
};
pub use patient::{AnotherPerson, Patient, PatientInSchedule};
pub use payment::Payment;
pub use record::{
    MedicineDetail, Prescription, PrescriptionDetail, QueueItem, RecordListItem, RecordPatient,
    RecordTreatment,
};
pub use schedule::ScheduleFull;
pub use user::{LoginResult, Profile, User, UserMinimal};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope most backend endpoints wrap their payload in.
///
/// `error` is a string on most failures and an array of strings on some, so
/// it stays untyped; the fetch-error normalizer knows both shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Whether the envelope itself reports a failure.
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }

    /// The envelope error as a single line of text.
    pub fn error_text(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// One page of a paginated list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination<T> {
    pub page_number: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_error_may_be_a_list() {
        let envelope: ApiResponse<Patient> = serde_json::from_value(json!({
            "status": 400,
            "error": ["Email đã tồn tại", "Số điện thoại đã tồn tại"],
        }))
        .unwrap();
        assert!(envelope.is_failure());
        assert!(envelope.body.is_none());
        assert_eq!(
            envelope.error_text().as_deref(),
            Some("Email đã tồn tại, Số điện thoại đã tồn tại")
        );
    }

    #[test]
    fn pagination_tolerates_missing_counters() {
        let page: Pagination<UserMinimal> =
            serde_json::from_value(json!({ "data": [{ "id": 3, "name": "An" }] })).unwrap();
        assert_eq!(page.page_number, 0);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "An");
    }
}
