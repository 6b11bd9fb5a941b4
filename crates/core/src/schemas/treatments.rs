//! Service ("dịch vụ") forms.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::max_chars;
use crate::forms::{de, rule_error, FormErrors, FormSchema};

fn whole_number(value: f64) -> Result<(), ValidationError> {
    if value.fract() == 0.0 {
        Ok(())
    } else {
        Err(rule_error("integer", "Số lượng phải là số nguyên"))
    }
}

/// A material a service consumes by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TreatmentMaterial {
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn vật tư"),
        range(min = 1, message = "Vui lòng chọn vật tư")
    )]
    pub material_id: Option<i64>,
    #[serde(deserialize_with = "de::number")]
    #[validate(
        required(message = "Số lượng chỉ bao gồm số"),
        custom(function = "whole_number"),
        range(exclusive_min = 0.0, message = "Số lượng phải là số dương")
    )]
    pub quantity: Option<f64>,
    #[serde(deserialize_with = "de::flag")]
    pub is_basic_unit: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTreatmentForm {
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Tên dịch vụ không được để trống"),
        length(min = 1, message = "Tên dịch vụ không được để trống")
    )]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::number")]
    #[validate(
        required(message = "Giá dịch vụ chỉ bao gồm số"),
        range(min = 0.0, message = "Giá dịch vụ không được âm")
    )]
    pub price: Option<f64>,
    #[serde(deserialize_with = "de::list")]
    #[validate(nested)]
    pub materials: Vec<TreatmentMaterial>,
}

impl FormSchema for CreateTreatmentForm {
    const ID: &'static str = "create-treatment";

    fn refine(&self, errors: &mut FormErrors) {
        let name = self.name.as_deref();
        max_chars(errors, "name", name, 255, "Tên dịch vụ không được vượt quá 255 kí tự");
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TreatmentFilterForm {
    #[serde(deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::number")]
    #[validate(range(min = 0.0, message = "Giá dịch vụ không được âm"))]
    pub from_price: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    #[validate(range(min = 0.0, message = "Giá dịch vụ không được âm"))]
    pub to_price: Option<f64>,
}

impl FormSchema for TreatmentFilterForm {
    const ID: &'static str = "treatment-filter";
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::forms::validate;

    #[test]
    fn service_with_default_materials() {
        let form = validate::<CreateTreatmentForm>(&json!({
            "name": "Cạo vôi răng",
            "price": "150000",
            "materials": [{ "materialId": 3, "quantity": 2, "isBasicUnit": true }],
        }))
        .unwrap();
        assert_eq!(form.materials.len(), 1);
        assert!(form.materials[0].is_basic_unit);
    }

    #[test]
    fn material_quantity_must_be_a_positive_whole_number() {
        let errors = validate::<CreateTreatmentForm>(&json!({
            "name": "Nhổ răng",
            "price": 0,
            "materials": [{ "materialId": 3, "quantity": 1.5 }, { "materialId": 4, "quantity": -1 }],
        }))
        .unwrap_err();
        assert_eq!(
            errors.field("materials[0].quantity"),
            Some(&["Số lượng phải là số nguyên".to_string()][..])
        );
        assert_eq!(
            errors.field("materials[1].quantity"),
            Some(&["Số lượng phải là số dương".to_string()][..])
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let errors = validate::<CreateTreatmentForm>(&json!({ "name": "A", "price": -1 })).unwrap_err();
        assert_eq!(errors.field("price"), Some(&["Giá dịch vụ không được âm".to_string()][..]));
    }
}
