use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::{de, FormSchema};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceFilterForm {
    #[serde(deserialize_with = "de::text")]
    pub patient_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub doctor_name: Option<String>,
}

impl FormSchema for InvoiceFilterForm {
    const ID: &'static str = "invoice-filter";
}
