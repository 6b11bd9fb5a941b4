//! Medical record and prescription forms.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::{de, FormErrors, FormSchema};

/// A material used on top of a record's treatments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraMaterial {
    #[serde(deserialize_with = "de::integer")]
    pub material_id: Option<i64>,
    #[serde(deserialize_with = "de::number")]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EditRecordForm {
    #[serde(deserialize_with = "de::string")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "de::string")]
    pub diagnosis: Option<String>,
    #[serde(deserialize_with = "de::integer_list")]
    pub treatment_id: Vec<i64>,
    #[serde(deserialize_with = "de::list")]
    pub extra_materials: Vec<ExtraMaterial>,
}

impl FormSchema for EditRecordForm {
    const ID: &'static str = "edit-record";
}

/// One prescription line. The backend spells the quantity key `quantiy`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EditPrescriptionDetailForm {
    #[serde(rename = "quantiy", deserialize_with = "de::number")]
    pub quantity: Option<f64>,
    #[serde(deserialize_with = "de::string")]
    #[validate(
        required(message = "Vui lòng nhập liều dùng"),
        length(min = 1, message = "Vui lòng nhập liều dùng")
    )]
    pub dosage: Option<String>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn thuốc"),
        range(min = 1, message = "Vui lòng chọn thuốc")
    )]
    pub material_id: Option<i64>,
    #[serde(deserialize_with = "de::flag")]
    pub is_basic_unit: bool,
}

impl Default for EditPrescriptionDetailForm {
    fn default() -> Self {
        Self {
            quantity: Some(1.0),
            dosage: None,
            material_id: Some(0),
            is_basic_unit: false,
        }
    }
}

impl FormSchema for EditPrescriptionDetailForm {
    const ID: &'static str = "edit-prescription-detail";

    fn refine(&self, errors: &mut FormErrors) {
        match self.quantity {
            None => errors.add("quantiy", "Vui lòng nhập số lượng"),
            Some(q) if q <= 0.0 => errors.add("quantiy", "Số lượng phải lớn hơn 0"),
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::forms::{validate, FormState};

    #[test]
    fn prescription_line_defaults() {
        let form = FormState::empty::<EditPrescriptionDetailForm>();
        assert_eq!(form.data["quantiy"], json!(1.0));
        assert_eq!(form.data["materialId"], json!(0));
    }

    #[test]
    fn prescription_line_rules() {
        let errors = validate::<EditPrescriptionDetailForm>(&json!({
            "quantiy": "0",
            "dosage": "",
            "materialId": 0,
        }))
        .unwrap_err();
        assert_eq!(errors.field("quantiy"), Some(&["Số lượng phải lớn hơn 0".to_string()][..]));
        assert_eq!(errors.field("dosage"), Some(&["Vui lòng nhập liều dùng".to_string()][..]));
        assert_eq!(errors.field("materialId"), Some(&["Vui lòng chọn thuốc".to_string()][..]));
    }

    #[test]
    fn record_edit_accepts_lists() {
        let form = validate::<EditRecordForm>(&json!({
            "reason": "Đau răng",
            "diagnosis": "Sâu răng",
            "treatmentId": ["2", 5],
            "extraMaterials": [{ "materialId": 1, "quantity": "2" }],
        }))
        .unwrap();
        assert_eq!(form.treatment_id, vec![2, 5]);
        assert_eq!(form.extra_materials[0].quantity, Some(2.0));
    }
}
