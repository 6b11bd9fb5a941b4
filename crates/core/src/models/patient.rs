use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::forms::de;
use crate::types::DbId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    pub id: DbId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::date")]
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInSchedule {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub age: i64,
}

/// Someone booked or treated on behalf of the account holder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnotherPerson {
    pub create_for_patient_name: String,
    pub create_for_patient_age: i64,
    pub note_for_patient_created_by: Option<String>,
    pub relation_with_current_patient: String,
}
