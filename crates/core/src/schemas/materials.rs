//! Inventory forms: materials, their types and suppliers, imports and
//! exports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::max_chars;
use crate::forms::{de, FormErrors, FormSchema};

pub const MSG_PRICE_POSITIVE: &str = "Đơn giá phải là số dương";
pub const MSG_EXPIRY_BEFORE_MAKE: &str = "Ngày hết hạn phải sau ngày sản xuất";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMaterialForm {
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Tên vật liệu không được để trống"),
        length(min = 1, message = "Tên vật liệu không được để trống")
    )]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::number")]
    #[validate(
        required(message = "Đơn giá phải là số dương"),
        range(exclusive_min = 0.0, message = "Đơn giá phải là số dương")
    )]
    pub price: Option<f64>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Loại vật liệu không được để trống"),
        range(min = 1, message = "Loại vật liệu không được để trống")
    )]
    pub material_type_id: Option<i64>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Nhà cung cấp không được để trống"),
        range(min = 1, message = "Nhà cung cấp không được để trống")
    )]
    pub supplier_id: Option<i64>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Đơn vị không được để trống"),
        length(min = 1, message = "Đơn vị không được để trống")
    )]
    pub unit: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Mô tả không được để trống"),
        length(min = 1, message = "Mô tả không được để trống")
    )]
    pub description: Option<String>,
}

impl FormSchema for CreateMaterialForm {
    const ID: &'static str = "create-material";

    fn refine(&self, errors: &mut FormErrors) {
        let name = self.name.as_deref();
        max_chars(errors, "name", name, 255, "Tên vật liệu không được vượt quá 255");
        let unit = self.unit.as_deref();
        max_chars(errors, "unit", unit, 255, "Đơn vị không được vượt quá 255");
        let description = self.description.as_deref();
        max_chars(errors, "description", description, 255, "Mô tả không được vượt quá 255");
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialTypeCreateForm {
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Tên không được để trống"),
        length(min = 1, message = "Tên không được để trống")
    )]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Mã không được để trống"),
        length(min = 1, message = "Mã không được để trống")
    )]
    pub code: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    pub description: Option<String>,
}

impl FormSchema for MaterialTypeCreateForm {
    const ID: &'static str = "material-type-create";

    fn refine(&self, errors: &mut FormErrors) {
        let name = self.name.as_deref();
        max_chars(errors, "name", name, 100, "Tên không được vượt quá 100 ký tự");
        let code = self.code.as_deref();
        max_chars(errors, "code", code, 50, "Mã không được vượt quá 50 ký tự");
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSupplierForm {
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Tên không được để trống"),
        length(min = 1, message = "Tên không được để trống")
    )]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Email không được để trống"),
        length(min = 1, message = "Email không được để trống")
    )]
    pub email: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Địa chỉ không được để trống"),
        length(min = 1, message = "Địa chỉ không được để trống")
    )]
    pub address: Option<String>,
    #[serde(deserialize_with = "de::trimmed")]
    #[validate(
        required(message = "Số điện thoại không được để trống"),
        length(min = 1, message = "Số điện thoại không được để trống"),
        custom(function = "super::phone_number")
    )]
    pub phone: Option<String>,
}

impl FormSchema for CreateSupplierForm {
    const ID: &'static str = "create-supplier";
}

/// One import batch. The invoice scan travels separately; only its size is
/// checked here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportMaterialForm {
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn vật tư"),
        range(min = 1, message = "Vui lòng chọn vật tư")
    )]
    pub material_id: Option<i64>,
    #[serde(deserialize_with = "de::number")]
    #[validate(
        required(message = "Giá nhập không thể là số âm"),
        range(min = 0.0, message = "Giá nhập không thể là số âm")
    )]
    pub input_price: Option<f64>,
    #[serde(deserialize_with = "de::date")]
    #[validate(required(message = "Vui lòng nhập ngày sản xuất"))]
    pub make_at: Option<NaiveDate>,
    #[serde(deserialize_with = "de::date")]
    #[validate(required(message = "Vui lòng nhập ngày hết hạn"))]
    pub expired_at: Option<NaiveDate>,
    #[serde(deserialize_with = "de::number")]
    #[validate(
        required(message = "Vui lòng chọn file"),
        range(exclusive_min = 0.0, message = "Vui lòng chọn file")
    )]
    pub file_size: Option<f64>,
}

impl FormSchema for ImportMaterialForm {
    const ID: &'static str = "import-material";

    fn refine(&self, errors: &mut FormErrors) {
        if let (Some(make_at), Some(expired_at)) = (self.make_at, self.expired_at) {
            if expired_at <= make_at {
                errors.add("expiredAt", MSG_EXPIRY_BEFORE_MAKE);
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportMaterialFilterForm {
    #[serde(deserialize_with = "de::date")]
    pub from_date: Option<NaiveDate>,
    #[serde(deserialize_with = "de::date")]
    pub to_date: Option<NaiveDate>,
    #[serde(deserialize_with = "de::text")]
    pub import_by: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub import_material_name: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub quantity: Option<f64>,
}

impl Default for ImportMaterialFilterForm {
    fn default() -> Self {
        Self {
            from_date: None,
            to_date: None,
            import_by: None,
            import_material_name: None,
            quantity: Some(0.0),
        }
    }
}

impl FormSchema for ImportMaterialFilterForm {
    const ID: &'static str = "import-material-filter";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportMaterialRequest {
    #[serde(deserialize_with = "de::string")]
    pub note: Option<String>,
    #[serde(deserialize_with = "de::integer")]
    #[validate(
        required(message = "Vui lòng chọn vật tư"),
        range(min = 1, message = "Vui lòng chọn vật tư")
    )]
    pub material_id: Option<i64>,
    #[serde(deserialize_with = "de::number")]
    #[validate(
        required(message = "Số lượng phải lớn hơn 0"),
        range(exclusive_min = 0.0, message = "Số lượng phải lớn hơn 0")
    )]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateExportMaterialForm {
    #[validate(
        length(min = 1, message = "Vui lòng chọn tối thiểu 1 vật tư"),
        nested
    )]
    #[serde(deserialize_with = "de::list")]
    pub export_material_requests: Vec<ExportMaterialRequest>,
}

impl FormSchema for CreateExportMaterialForm {
    const ID: &'static str = "create-export-material";
}

/// Which concrete stock items fulfil one export line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportMaterialAssignment {
    #[serde(deserialize_with = "de::integer")]
    pub export_material_id: Option<i64>,
    #[serde(deserialize_with = "de::integer_list")]
    pub available_material_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EditExportMaterialForm {
    #[serde(deserialize_with = "de::trimmed")]
    pub export_material_group: Option<String>,
    #[serde(deserialize_with = "de::list")]
    pub export_material_assignments: Vec<ExportMaterialAssignment>,
}

impl FormSchema for EditExportMaterialForm {
    const ID: &'static str = "edit-export-material";
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialFilterForm {
    #[serde(deserialize_with = "de::text")]
    pub material_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub supplier_name: Option<String>,
    #[serde(deserialize_with = "de::integer")]
    pub material_type: Option<i64>,
    #[serde(deserialize_with = "de::number")]
    pub from_price: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    pub to_price: Option<f64>,
    #[serde(deserialize_with = "de::integer")]
    pub from_quantity: Option<i64>,
    #[serde(deserialize_with = "de::integer")]
    pub to_quantity: Option<i64>,
}

impl Default for MaterialFilterForm {
    fn default() -> Self {
        Self {
            material_name: None,
            supplier_name: None,
            material_type: None,
            from_price: Some(0.0),
            to_price: Some(0.0),
            from_quantity: Some(0),
            to_quantity: Some(0),
        }
    }
}

impl FormSchema for MaterialFilterForm {
    const ID: &'static str = "material-filter";
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::forms::validate;

    fn gauze() -> serde_json::Value {
        json!({
            "name": "Gauze",
            "price": 10,
            "materialTypeId": 1,
            "supplierId": 2,
            "unit": "Gói",
            "description": "Gạc y tế vô trùng",
        })
    }

    #[test]
    fn create_material_accepts_a_valid_bag() {
        let form = validate::<CreateMaterialForm>(&gauze()).unwrap();
        assert_eq!(form.name.as_deref(), Some("Gauze"));
        assert_eq!(form.price, Some(10.0));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut raw = gauze();
        raw["price"] = json!(-5);
        let errors = validate::<CreateMaterialForm>(&raw).unwrap_err();
        assert_eq!(errors.field("price"), Some(&[MSG_PRICE_POSITIVE.to_string()][..]));
        assert_eq!(errors.fields.len(), 1);
    }

    #[test]
    fn zero_price_is_not_positive() {
        let mut raw = gauze();
        raw["price"] = json!("0");
        assert!(validate::<CreateMaterialForm>(&raw).is_err());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut raw = gauze();
        raw["name"] = json!("x".repeat(256));
        let errors = validate::<CreateMaterialForm>(&raw).unwrap_err();
        assert_eq!(
            errors.field("name"),
            Some(&["Tên vật liệu không được vượt quá 255".to_string()][..])
        );
    }

    #[test]
    fn import_must_expire_after_it_was_made() {
        let errors = validate::<ImportMaterialForm>(&json!({
            "materialId": 4,
            "inputPrice": 1000,
            "makeAt": "2024-05-01",
            "expiredAt": "2024-05-01",
            "fileSize": 2048,
        }))
        .unwrap_err();
        assert_eq!(errors.field("expiredAt"), Some(&[MSG_EXPIRY_BEFORE_MAKE.to_string()][..]));
    }

    #[test]
    fn export_needs_at_least_one_line() {
        let errors =
            validate::<CreateExportMaterialForm>(&json!({ "exportMaterialRequests": [] })).unwrap_err();
        assert_eq!(
            errors.field("exportMaterialRequests"),
            Some(&["Vui lòng chọn tối thiểu 1 vật tư".to_string()][..])
        );
    }

    #[test]
    fn export_lines_that_are_not_a_list_name_the_field() {
        for lines in [json!(null), json!("1"), json!({ "materialId": 1 })] {
            let errors = validate::<CreateExportMaterialForm>(&json!({ "exportMaterialRequests": lines }))
                .unwrap_err();
            assert_eq!(errors.message, None);
            assert_eq!(
                errors.field("exportMaterialRequests"),
                Some(&["Vui lòng chọn tối thiểu 1 vật tư".to_string()][..])
            );
        }
    }

    #[test]
    fn positional_array_body_is_malformed() {
        let errors =
            validate::<CreateMaterialForm>(&json!(["Gauze", 10, 1, 1, "hộp", "d"])).unwrap_err();
        assert_eq!(errors.message.as_deref(), Some(crate::forms::MSG_MALFORMED));
        assert!(errors.fields.is_empty());
    }

    #[test]
    fn export_line_errors_carry_their_index() {
        let errors = validate::<CreateExportMaterialForm>(&json!({
            "exportMaterialRequests": [
                { "materialId": 1, "quantity": 2, "note": "" },
                { "materialId": 0, "quantity": 1 },
            ],
        }))
        .unwrap_err();
        assert_eq!(
            errors.field("exportMaterialRequests[1].materialId"),
            Some(&["Vui lòng chọn vật tư".to_string()][..])
        );
    }

    #[test]
    fn supplier_phone_must_be_ten_digits() {
        let errors = validate::<CreateSupplierForm>(&json!({
            "name": "Công ty A",
            "email": "a@ncc.vn",
            "address": "Hà Nội",
            "phone": "12345",
        }))
        .unwrap_err();
        assert_eq!(
            errors.field("phone"),
            Some(&["Số điện thoại bao gồm 10 chữ số".to_string()][..])
        );
    }

    #[test]
    fn supplier_phone_rejects_non_ascii_digits() {
        let errors = validate::<CreateSupplierForm>(&json!({
            "name": "Công ty A",
            "email": "a@ncc.vn",
            "address": "Hà Nội",
            "phone": "０９１２３４５６７８",
        }))
        .unwrap_err();
        assert!(errors.field("phone").is_some());
    }
}
