use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::forms::de;
use crate::types::DbId;

/// Row of the invoices list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    pub record_id: DbId,
    pub patient_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(deserialize_with = "de::datetime")]
    pub examination_date: Option<NaiveDateTime>,
    pub doctor_name: String,
    pub status: u8,
}
